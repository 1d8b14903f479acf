use crate::mood::Mood;
use crate::recommend::{Recommendation, RecommendationScore};
use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

fn ansi(color: AnsiColor) -> Style {
    Style::new().bold().fg_color(Some(Color::Ansi(color)))
}

pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(ansi(AnsiColor::Magenta).underline())
        .header(ansi(AnsiColor::Magenta).underline())
        .literal(ansi(AnsiColor::Green))
        .invalid(ansi(AnsiColor::Red))
        .error(ansi(AnsiColor::Red))
        .valid(ansi(AnsiColor::Green))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const ACCENT: Color = Color::Rgb {
        r: 255,
        g: 105,
        b: 180,
    };
    pub const SECONDARY: Color = Color::Rgb {
        r: 180,
        g: 100,
        b: 255,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 136,
    };
    pub const ORANGE: Color = Color::Rgb {
        r: 255,
        g: 165,
        b: 0,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

pub mod box_chars {
    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";
    pub const HORIZONTAL: &str = "─";

    pub const NOTE: &str = "♪";
    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const DIAMOND: &str = "◆";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

const SECTION_WIDTH: usize = 60;

fn rule(width: usize) -> String {
    box_chars::HORIZONTAL.repeat(width)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    eprintln!(
        " {} {}",
        box_chars::CROSS_MARK.with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::ORANGE).bold(),
        message.with(colors::ORANGE)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_section_header(title: &str) {
    let title_len = title.width();
    let left = SECTION_WIDTH.saturating_sub(title_len + 4) / 2;
    let right = SECTION_WIDTH.saturating_sub(title_len + 4 + left);

    println!();
    println!(
        "{}{} {} {}{}",
        box_chars::ROUND_TOP_LEFT.with(colors::ACCENT),
        rule(left).with(colors::ACCENT),
        title
            .with(colors::ACCENT)
            .bold()
            .attribute(Attribute::Italic),
        rule(right).with(colors::ACCENT),
        box_chars::ROUND_TOP_RIGHT.with(colors::ACCENT)
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        box_chars::ROUND_BOTTOM_LEFT.with(colors::ACCENT),
        rule(SECTION_WIDTH).with(colors::ACCENT),
        box_chars::ROUND_BOTTOM_RIGHT.with(colors::ACCENT)
    );
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::SECONDARY),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Recommendations
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_moods() {
    print_section_header("Available Moods");
    for mood in Mood::ALL {
        println!(
            "  {} {}  {}",
            box_chars::DIAMOND.with(colors::SECONDARY),
            format!("{:<10}", mood.as_str()).with(colors::GREEN).bold(),
            mood.description().with(colors::DIM)
        );
    }
    print_section_footer();
}

pub fn print_recommendation(position: usize, row: &Recommendation) {
    println!(
        "  {} {}",
        format!("{}{}", box_chars::NOTE, position).with(colors::ACCENT).bold(),
        row.song_name.as_str().with(colors::WHITE).bold()
    );
    print_key_value("Artist", &row.artist_name);
    match row.score {
        RecommendationScore::Mood(score) => print_key_value("Mood Score", &format!("{:.2}", score)),
        RecommendationScore::Similarity(score) => {
            print_key_value("Similarity Score", &format!("{:.2}", score))
        }
        RecommendationScore::Unranked => {}
    }
    print_key_value("URL", &row.url);
    print_key_value("YouTube Search Link", &row.search_link);
    println!();
}

pub fn print_recommendations(title: &str, rows: &[Recommendation]) {
    print_section_header(title);
    if rows.is_empty() {
        print_empty_list("No songs to show");
    }
    for (i, row) in rows.iter().enumerate() {
        print_recommendation(i + 1, row);
    }
    print_section_footer();
}

pub fn print_links(title: &str, links: &[String]) {
    print_section_header(title);
    if links.is_empty() {
        print_empty_list("No matching clips");
    }
    for link in links {
        println!(
            "  {} {}",
            box_chars::NOTE.with(colors::SECONDARY),
            link.as_str().with(colors::WHITE)
        );
    }
    print_section_footer();
}

// ═══════════════════════════════════════════════════════════════════════════════
// REPL chrome
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt() -> String {
    format!(
        "{}{} ",
        box_chars::NOTE.with(colors::ACCENT).bold(),
        "❯".with(colors::SECONDARY).bold(),
    )
}

pub fn print_welcome(data_dir: &str, artists: usize, songs: usize, tags: usize) {
    println!();
    println!(
        "  {}",
        "MOODTRACK  ·  mood based music recommendations"
            .with(colors::ACCENT)
            .bold()
    );
    println!("  {}", rule(46).with(colors::DIM));
    print_key_value("Dataset", data_dir);
    print_key_value("Artists", &artists.to_string());
    print_key_value("Songs", &songs.to_string());
    print_key_value("Tags", &tags.to_string());
    println!();
    println!("  {}", "Type 'help' for available commands".with(colors::DIM));
    println!();
}

pub struct CommandHelp {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
}

pub fn print_help(commands: &[CommandHelp]) {
    print_section_header("Available Commands");
    println!();

    fn print_command_group(title: &str, commands: &[&CommandHelp], color: CtColor) {
        println!(
            "  {} {}",
            box_chars::DIAMOND.with(color),
            title.with(color).bold()
        );
        for cmd in commands {
            println!(
                "      {} {}  {}",
                cmd.name.with(colors::GREEN).bold(),
                cmd.args.with(colors::DIM),
                cmd.description.with(colors::WHITE)
            );
        }
        println!();
    }

    let (system, queries): (Vec<&CommandHelp>, Vec<&CommandHelp>) = commands
        .iter()
        .partition(|c| matches!(c.name, "help" | "exit"));
    print_command_group("Recommendations", &queries, colors::ACCENT);
    print_command_group("System", &system, colors::ORANGE);

    print_section_footer();
}

pub fn print_goodbye() {
    println!();
    println!(
        "  {}",
        "Thank you for using the Music Recommender!"
            .with(colors::SECONDARY)
            .bold()
    );
    println!();
}
