use propstring::ProcessDetails;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(template: &str, details: &ProcessDetails, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Processing: \"{}\"", template), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    if details.steps.is_empty() {
        println!("{}", palette.dim("  No rules applied"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • No parsers registered and no -r/--rule given");
        println!("  • A named parser resolved to an empty rule collection");
    } else {
        print_steps(details, &palette);
    }

    println!("\n{}", palette.paint("━━━ Output ━━━", ansi::GRAY));
    println!("  {}", palette.bold(palette.paint(&details.output, ansi::GREEN)));

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Rules: {}",
        palette.paint(format!("{:?}", details.elapsed), ansi::GREEN),
        palette.paint(details.steps.len().to_string(), ansi::CYAN),
    );
    println!();
}

fn print_steps(details: &ProcessDetails, palette: &ansi::Palette) {
    for (idx, step) in details.steps.iter().enumerate() {
        println!(
            "  {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.paint(&step.pattern, ansi::CYAN),
            if step.matches > 0 {
                palette.paint(format!("✓ {} match(es)", step.matches), ansi::GREEN)
            } else {
                palette.dim("✗ 0 matches".to_string())
            }
        );
        if step.matches > 0 {
            println!("      {} {}", palette.dim("now:"), palette.dim(step.preview.clone()));
        }
    }
}
