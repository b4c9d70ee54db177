//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use verigate_config::{Config, PolicyConfig};
use verigate_types::{ColorChoice, LogStats, OutputFormat, VerificationRecord};

/// Result of a CLI command, ready for rendering
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutput {
    Record {
        record: VerificationRecord,
    },
    Batch {
        records: Vec<VerificationRecord>,
        stats: LogStats,
    },
    Sources {
        sources: BTreeMap<String, Vec<String>>,
    },
    Rules {
        patterns: Vec<String>,
        policy: PolicyConfig,
    },
    Config {
        #[serde(skip)]
        toml: String,
        config: Config,
    },
}

impl CommandOutput {
    /// Process exit status for this output
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Record { record } if !record.verified => 2,
            Self::Batch { records, .. } if records.iter().any(|r| !r.verified) => 2,
            _ => 0,
        }
    }
}

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    format: OutputFormat,
    color_choice: ColorChoice,
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(format: OutputFormat, color_choice: ColorChoice) -> Self {
        Self {
            format,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render command output
    pub fn render_result(&self, output: &CommandOutput) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.render_json(output),
            OutputFormat::Tty | OutputFormat::Plain => self.render_text(output),
        }
    }

    #[allow(clippy::unused_self)]
    fn render_json(&self, output: &CommandOutput) -> io::Result<()> {
        let json = serde_json::to_string_pretty(output).map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    fn render_text(&self, output: &CommandOutput) -> io::Result<()> {
        match output {
            CommandOutput::Record { record } => self.render_record(record),
            CommandOutput::Batch { records, stats } => self.render_batch(records, stats),
            CommandOutput::Sources { sources } => self.render_sources(sources),
            CommandOutput::Rules { patterns, policy } => self.render_rules(patterns, policy),
            CommandOutput::Config { toml, .. } => {
                print!("{toml}");
                Ok(())
            }
        }
    }

    fn render_record(&self, record: &VerificationRecord) -> io::Result<()> {
        println!("{}", self.style_verdict(record.verified));
        println!();
        println!("Sequence:     {}", record.sequence);
        println!("Source:       {}", record.source);
        println!(
            "Provenance:   {}",
            if record.source_verified {
                "trusted"
            } else {
                "untrusted"
            }
        );
        println!("Fingerprint:  {}", record.content_fingerprint);
        println!("Timestamp:    {}", record.timestamp_iso());

        if !record.violations.is_empty() {
            println!();
            println!("Violations:");
            for violation in &record.violations {
                println!("  - {}", self.style_warning(violation));
            }
        }

        Ok(())
    }

    fn render_batch(&self, records: &[VerificationRecord], stats: &LogStats) -> io::Result<()> {
        if records.is_empty() {
            println!("No items to verify.");
            return Ok(());
        }

        if self.format == OutputFormat::Plain {
            for record in records {
                println!(
                    "{}\t{}\t{}\t{}",
                    record.sequence,
                    if record.verified { "verified" } else { "rejected" },
                    record.source,
                    record.violations.join("; ")
                );
            }
        } else {
            let mut table = self.new_table();
            table.set_header(vec![
                Cell::new("#").add_attribute(Attribute::Bold),
                Cell::new("Verdict").add_attribute(Attribute::Bold),
                Cell::new("Source").add_attribute(Attribute::Bold),
                Cell::new("Fingerprint").add_attribute(Attribute::Bold),
                Cell::new("Violations").add_attribute(Attribute::Bold),
            ]);

            for record in records {
                let verdict = if record.verified {
                    Cell::new("verified").fg(Color::Green)
                } else {
                    Cell::new("rejected").fg(Color::Red)
                };
                table.add_row(vec![
                    Cell::new(record.sequence),
                    verdict,
                    Cell::new(&record.source),
                    Cell::new(short_fingerprint(&record.content_fingerprint)),
                    Cell::new(record.violations.len()),
                ]);
            }

            println!("{table}");
        }

        println!();
        println!(
            "{} verified, {} rejected ({} untrusted source, {} flagged content)",
            stats.verified, stats.rejected, stats.untrusted_source, stats.flagged_content
        );
        if stats.evicted > 0 {
            println!("{} older records evicted from the log", stats.evicted);
        }

        Ok(())
    }

    fn render_sources(&self, sources: &BTreeMap<String, Vec<String>>) -> io::Result<()> {
        if self.format == OutputFormat::Plain {
            for (category, identifiers) in sources {
                for identifier in identifiers {
                    println!("{category}\t{identifier}");
                }
            }
            return Ok(());
        }

        let mut table = self.new_table();
        table.set_header(vec![
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Identifier").add_attribute(Attribute::Bold),
        ]);
        for (category, identifiers) in sources {
            for identifier in identifiers {
                table.add_row(vec![Cell::new(category), Cell::new(identifier)]);
            }
        }

        println!("{table}");
        Ok(())
    }

    fn render_rules(&self, patterns: &[String], policy: &PolicyConfig) -> io::Result<()> {
        println!("{}", self.style_heading("Pattern rules (case-insensitive)"));
        if patterns.is_empty() {
            println!("  (none)");
        }
        for pattern in patterns {
            println!("  {pattern}");
        }

        for (title, notes) in [
            ("Source verification policy", &policy.source_verification),
            ("Content verification policy", &policy.content_verification),
        ] {
            if notes.is_empty() {
                continue;
            }
            println!();
            println!("{}", self.style_heading(title));
            for note in notes {
                println!("  - {note}");
            }
        }

        Ok(())
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.supports_color() {
            table.force_no_tty();
        }
        table
    }

    fn style_verdict(&self, verified: bool) -> String {
        let (text, style) = if verified {
            ("VERIFIED", Style::new().green().bold())
        } else {
            ("NOT VERIFIED", Style::new().red().bold())
        };
        if self.supports_color() {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn style_warning(&self, text: &str) -> String {
        if self.supports_color() {
            Style::new().yellow().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn style_heading(&self, text: &str) -> String {
        if self.supports_color() {
            Style::new().bold().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn supports_color(&self) -> bool {
        if self.format == OutputFormat::Plain {
            return false;
        }
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

/// First 16 hex digits, enough to tell records apart in a table
fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..16).unwrap_or(fingerprint)
}
