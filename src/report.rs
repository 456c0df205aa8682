use password_rules::{Evaluation, RuleInfo, Transition};

/// Terminal styling keyed by what is being shown rather than by color.
mod style {
    #[derive(Clone, Copy)]
    pub enum Tone {
        Pass,
        Fail,
        Rule,
        Count,
        Heading,
        Banner,
        Muted,
    }

    impl Tone {
        fn sgr(self) -> &'static str {
            match self {
                Tone::Pass => "32",
                Tone::Fail => "31",
                Tone::Rule => "34",
                Tone::Count => "33",
                Tone::Heading => "90",
                Tone::Banner => "1;36",
                Tone::Muted => "2",
            }
        }
    }

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, tone: Tone, s: impl AsRef<str>) -> String {
            if self.enabled { format!("\x1b[{}m{}\x1b[0m", tone.sgr(), s.as_ref()) } else { s.as_ref().to_string() }
        }

        pub fn mark(&self, passed: bool) -> String {
            if passed { self.paint(Tone::Pass, "✓") } else { self.paint(Tone::Fail, "✗") }
        }

        pub fn heading(&self, title: &str) -> String {
            self.paint(Tone::Heading, format!("━━━ {title} ━━━"))
        }
    }
}

use style::Tone;

pub struct Reporter {
    palette: style::Palette,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Self { palette: style::Palette::new(color) }
    }

    pub fn print_edit(&self, password: &str, evaluation: &Evaluation, transitions: &[Transition], total: usize) {
        let p = &self.palette;
        println!("\n{}", p.paint(Tone::Banner, format!("🔑 Password: \"{password}\"")));
        println!(
            "  {} {}  {} {}",
            p.paint(Tone::Muted, "length:"),
            p.paint(Tone::Count, evaluation.char_count.to_string()),
            p.paint(Tone::Muted, "│ active:"),
            p.paint(Tone::Rule, format!("{}/{total}", evaluation.statuses.len())),
        );

        for transition in transitions {
            let line = match transition {
                Transition::RuleRevealed(id) => p.paint(Tone::Rule, format!("➕ Rule {id} revealed")),
                Transition::Won => p.paint(Tone::Pass, "🏆 All rules satisfied. You win!"),
            };
            println!("  {line}");
        }

        println!("{}", p.heading("Rules"));
        for status in evaluation.display_order().into_iter().filter_map(|id| evaluation.status(id)) {
            println!(
                "  {} {} {}",
                p.mark(status.passed),
                p.paint(Tone::Heading, format!("Rule {:>2}:", status.id)),
                status.description
            );
        }
    }

    pub fn print_tick(&self, flipped: &[(u32, bool)]) {
        let p = &self.palette;
        for &(id, passed) in flipped {
            println!("  {} rule {id} now {}", p.paint(Tone::Heading, "⏱ tick:"), p.mark(passed));
        }
    }

    pub fn print_catalogue(&self, rules: &[RuleInfo]) {
        let p = &self.palette;
        println!("\n{}", p.heading("Catalogue"));
        for info in rules {
            let tags: Vec<&str> = [(info.dynamic, "dynamic"), (info.hidden, "hidden"), (info.meta, "meta")]
                .into_iter()
                .filter_map(|(set, tag)| set.then_some(tag))
                .collect();
            let tags = if tags.is_empty() { String::new() } else { format!(" [{}]", tags.join(", ")) };

            println!("  {} {}{}", p.paint(Tone::Rule, format!("{:>2}.", info.id)), info.description, p.paint(Tone::Muted, tags));
            if !info.examples.is_empty() {
                println!("      {} {}", p.paint(Tone::Muted, "examples:"), p.paint(Tone::Count, info.examples.join("  ")));
            }
            if let Some(visual) = info.visual {
                println!("      {} {}", p.paint(Tone::Muted, "characters:"), p.paint(Tone::Count, visual));
            }
        }
        println!();
    }

    pub fn print_summary(&self, won: bool, active: usize, total: usize) {
        let p = &self.palette;
        println!("\n{}", p.heading("Summary"));
        if won {
            println!("  {}", p.paint(Tone::Pass, "Won"));
        } else {
            println!("  {} {}", p.paint(Tone::Muted, "Not won yet │ rules active:"), p.paint(Tone::Rule, format!("{active}/{total}")));
        }
        println!();
    }
}
