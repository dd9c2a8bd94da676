use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::TitleList;
use crate::shared::errors::AppResult;

/// Command-line arguments for shikisync
#[derive(Parser, Debug)]
#[command(name = "shikisync")]
#[command(about = "Synchronize anime/manga/ranobe lists between Shikimori and MyAnimeList")]
#[command(version)]
pub struct Cli {
    /// Per-title template line for printing lists; raw JSON when omitted
    #[arg(short, long, global = true)]
    pub template: Option<String>,

    /// Override the config directory
    #[arg(short, long, global = true, env = "SHIKISYNC_HOME")]
    pub config: Option<PathBuf>,

    /// Wrap template-rendered lines into a JSON array
    #[arg(short, long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show your listing from one of the sites
    List {
        /// Site of your list: shikimori or myanimelist
        source: String,
    },
    /// Show the delta between the two sites
    Delta {
        /// Use myanimelist as the base side instead of shikimori
        #[arg(short, long, default_value_t = false)]
        reverse: bool,
    },
    /// Show the field names recognized in templates
    Template,
}

/// Print a result list: one rendered line per title when a template is
/// given (optionally wrapped into a JSON array), raw JSON otherwise.
pub fn emit(list: &TitleList, template: Option<&str>, json: bool) -> AppResult<()> {
    match template {
        Some(template) => {
            let lines = list.render(template)?;
            if json {
                println!("{}", serde_json::to_string(&lines)?);
            } else {
                for line in lines {
                    println!("{}", line);
                }
            }
        }
        None => println!("{}", serde_json::to_string(&list.to_records())?),
    }
    Ok(())
}

/// The `template` subcommand: reference sheet for the recognized fields.
pub fn print_template_help() {
    println!(
        "\
Meta fields:
{{modify_type}} - type of title change in a delta: unmodified, added, edited or removed
{{title_type}}  - type of title: anime, manga or ranobe
  (ranobe is a manga parsed from shikimori with /ranobe/ in its URL;
   myanimelist files those under manga)

Status fields:
{{watch_status}} - watch status: planned, watching, completed, on_hold, rewatching, dropped
{{score}}        - score in list: int [0..10]
{{episodes}}     - anime episodes watched, 0 for manga/ranobe
{{chapters}}     - manga/ranobe chapters read, 0 for anime
{{volumes}}      - manga/ranobe volumes read, 0 for anime
{{watch_count}}  - max(episodes, chapters)
{{rewatches}}    - count of rewatches/rereads
{{comment}}      - comment, or an empty string
{{delta}}        - field differences of the same title on both sites, as a JSON object

Title fields:
{{id}}   - id (used in title URLs and the APIs)
{{name}} - title"
    );
}
