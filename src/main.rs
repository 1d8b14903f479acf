use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use moodtrack::app::{init_tracing, parse_path, CommonArgs, Services};
use moodtrack::captions::DEFAULT_CAPTION_LINKS;
use moodtrack::cli_style::{self, get_styles, CommandHelp};
use moodtrack::mood::Mood;
use moodtrack::recommend::QueryKind;
use std::path::PathBuf;

use rustyline::{
    completion::Completer,
    highlight::Highlighter,
    history::FileHistory,
    validate::Validator,
    CompletionType, Config, Editor, Helper,
};

#[derive(Parser, Debug)]
#[command(styles=get_styles(), about = "Interactive mood based music recommendations")]
struct CliArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser)]
#[command(styles=get_styles(), name = "", disable_help_subcommand = true)]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Songs similar to a random song of the given artist.
    Artist {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Best songs for a mood.
    Mood { mood: String },

    /// A random pick of songs carrying a tag or genre.
    Tag {
        #[arg(required = true, num_args = 1..)]
        tag: Vec<String>,
    },

    /// Lists the available moods.
    Moods,

    /// Caption dataset clips for a mood.
    Captions { mood: String },

    /// Classifies a video and recommends music for its mood.
    Video {
        #[clap(value_parser = parse_path)]
        path: PathBuf,
    },

    /// Shows the available commands.
    Help,

    /// Close this program.
    Exit,
}

const COMMANDS_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "artist",
        args: "<name>",
        description: "Find similar songs by artist",
    },
    CommandHelp {
        name: "mood",
        args: "<mood>",
        description: "Recommend songs by mood",
    },
    CommandHelp {
        name: "tag",
        args: "<tag>",
        description: "Recommend songs by tag/genre (rock, electronic, pop, jazz, metal...)",
    },
    CommandHelp {
        name: "moods",
        args: "",
        description: "List the available moods",
    },
    CommandHelp {
        name: "captions",
        args: "<mood>",
        description: "Caption dataset clips for a mood",
    },
    CommandHelp {
        name: "video",
        args: "<path>",
        description: "Recommend songs for a video",
    },
    CommandHelp {
        name: "help",
        args: "",
        description: "Show this help",
    },
    CommandHelp {
        name: "exit",
        args: "",
        description: "Close this program",
    },
];

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

fn run_query(services: &Services, kind: QueryKind, value: &str) -> CommandExecutionResult {
    let outcome = services
        .recommender
        .recommend_songs(&kind.to_string(), value);
    if let Some(notice) = &outcome.notice {
        return CommandExecutionResult::Error(notice.to_string());
    }
    let title = match kind {
        QueryKind::Mood => {
            let mut chars = value.trim().chars();
            match chars.next() {
                Some(first) => format!(
                    "Recommended {}{} Songs",
                    first.to_uppercase(),
                    chars.as_str().to_lowercase()
                ),
                None => "Recommended Songs".to_string(),
            }
        }
        QueryKind::Artist | QueryKind::Tag => "Recommended Songs".to_string(),
    };
    cli_style::print_recommendations(&title, &outcome.rows);
    CommandExecutionResult::Ok
}

fn execute_command(line: String, services: &Services) -> CommandExecutionResult {
    if line.trim().is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => match cli.command {
            InnerCommand::Artist { name } => run_query(services, QueryKind::Artist, &name.join(" ")),
            InnerCommand::Mood { mood } => run_query(services, QueryKind::Mood, &mood),
            InnerCommand::Tag { tag } => run_query(services, QueryKind::Tag, &tag.join(" ")),
            InnerCommand::Moods => {
                cli_style::print_moods();
                CommandExecutionResult::Ok
            }
            InnerCommand::Captions { mood } => {
                let mood: Mood = match mood.parse() {
                    Ok(mood) => mood,
                    Err(err) => return CommandExecutionResult::Error(format!("{}", err)),
                };
                match &services.captions {
                    Some(library) => {
                        let links = library.links_for_mood(mood, DEFAULT_CAPTION_LINKS);
                        cli_style::print_links(
                            &format!("Recommended songs for mood '{}'", mood),
                            &links,
                        );
                        CommandExecutionResult::Ok
                    }
                    None => CommandExecutionResult::Error(
                        "No captions loaded, check --captions.".to_string(),
                    ),
                }
            }
            InnerCommand::Video { path } => {
                let pipeline = match services.video_pipeline() {
                    Some(pipeline) => pipeline,
                    None => {
                        return CommandExecutionResult::Error(
                            "No video classifier available, check --classifier.".to_string(),
                        )
                    }
                };
                match pipeline.recommend_for_video(&path) {
                    Ok(result) => {
                        cli_style::print_success(&format!("Detected mood: {}", result.mood));
                        cli_style::print_recommendations("Recommended Songs", &result.songs.rows);
                        if let Some(notice) = &result.songs.notice {
                            cli_style::print_warning(&notice.to_string());
                        }
                        if services.captions.is_some() {
                            cli_style::print_links("Caption Clips", &result.caption_links);
                        }
                        CommandExecutionResult::Ok
                    }
                    Err(err) => CommandExecutionResult::Error(format!("{}", err)),
                }
            }
            InnerCommand::Help => {
                cli_style::print_help(COMMANDS_HELP);
                CommandExecutionResult::Ok
            }
            InnerCommand::Exit => CommandExecutionResult::Exit,
        },
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            CommandExecutionResult::Ok
        }
    }
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        // Second word of `mood`/`captions` completes to a mood name.
        if let Some(prefix) = line
            .strip_prefix("mood ")
            .or_else(|| line.strip_prefix("captions "))
        {
            let start = line.len() - prefix.len();
            let matches = Mood::names()
                .into_iter()
                .filter(|m| m.starts_with(prefix))
                .map(String::from)
                .collect();
            return Ok((start, matches));
        }
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .map(|c| c.to_string())
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_tracing();

    let config = cli_args.common.resolve()?;
    println!("Initializing Music Recommendation System...");
    let services = Services::load(config)?;

    let catalog = services.recommender.catalog();
    cli_style::print_welcome(
        &services.config.data_dir.display().to_string(),
        catalog.get_artists_count(),
        catalog.get_songs_count(),
        catalog.get_tags_count(),
    );

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(MyHelper::new()));

    let prompt = cli_style::get_prompt();
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line, &services) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => {
                        cli_style::print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                cli_style::print_error(&format!("{:?}", e));
                break;
            }
        }
    }
    cli_style::print_goodbye();
    Ok(())
}
