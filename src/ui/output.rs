use owo_colors::OwoColorize;
use std::sync::OnceLock;

pub struct Icons;

impl Icons {
    pub const BOX: &str = "📦";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const DEL: &str = "🗑️";
}

/// Styles used for human output; plain when stdout is not a terminal
#[derive(Debug, Clone)]
pub struct Palette {
    pub header: owo_colors::Style,
    pub success: owo_colors::Style,
    pub error: owo_colors::Style,
    pub warn: owo_colors::Style,
    pub dim: owo_colors::Style,
}

static PALETTE: OnceLock<Palette> = OnceLock::new();

pub fn palette() -> &'static Palette {
    PALETTE.get_or_init(|| {
        if console::Term::stdout().is_term() {
            Palette {
                header: owo_colors::Style::new().cyan().bold(),
                success: owo_colors::Style::new().green().bold(),
                error: owo_colors::Style::new().red().bold(),
                warn: owo_colors::Style::new().yellow().bold(),
                dim: owo_colors::Style::new().white().dimmed(),
            }
        } else {
            Palette {
                header: owo_colors::Style::new(),
                success: owo_colors::Style::new(),
                error: owo_colors::Style::new(),
                warn: owo_colors::Style::new(),
                dim: owo_colors::Style::new(),
            }
        }
    })
}

pub fn header(text: &str) {
    println!("{} {}", Icons::BOX, text.style(palette().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(palette().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(palette().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(palette().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!("{} {}: {}", Icons::INFO, label.style(palette().dim.clone()), value);
}

pub fn deleted(lot: &str) {
    println!("{} {}", Icons::DEL, lot.style(palette().warn.clone()));
}
