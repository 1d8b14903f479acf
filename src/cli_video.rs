use anyhow::{bail, Context, Result};
use clap::Parser;
use moodtrack::app::{init_tracing, parse_path, CommonArgs, Services};
use moodtrack::cli_style::{self, get_styles};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(styles=get_styles(), about = "Recommends music for the mood of a video")]
struct CliArgs {
    /// The video to classify.
    #[clap(value_parser = parse_path)]
    pub video: PathBuf,

    /// Print the result as JSON instead of formatted text.
    #[clap(long)]
    pub json: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_tracing();

    let config = cli_args.common.resolve()?;
    if config.classifier_command.is_none() {
        bail!("A classifier must be specified via --classifier or in config file");
    }
    let services = Services::load(config)?;
    let pipeline = services
        .video_pipeline()
        .context("Video classifier unavailable")?;

    let result = pipeline.recommend_for_video(&cli_args.video)?;

    if cli_args.json {
        println!("{}", result.to_json()?);
        return Ok(());
    }

    cli_style::print_success(&format!(
        "{} looks {}",
        result.video.display(),
        result.mood
    ));
    cli_style::print_recommendations("Recommended Songs", &result.songs.rows);
    if let Some(notice) = &result.songs.notice {
        cli_style::print_warning(&notice.to_string());
    }
    if services.captions.is_some() {
        cli_style::print_links(
            &format!("Recommended songs for mood '{}'", result.mood),
            &result.caption_links,
        );
    }
    Ok(())
}
