//! Command-line interface for the templater.

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{is_remote_source, LoaderOptions, DEFAULT_MAX_RESPONSE_SIZE};
use crate::error::Result;
use crate::model::{Address, TemplateModel};
use crate::parser::AttributeCase;
use crate::templater::{Templater, TemplaterOptions};
use crate::yaml::generate_yaml;

/// Mail Templater - Load XML mail templates and inspect the result.
#[derive(Parser)]
#[command(name = "mail-templater")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a template and print what it describes.
    Inspect {
        /// Template path, file:// path or http(s) URL
        source: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,

        /// Recognise attribute names in any case (e.g. `RegionId`)
        #[arg(long)]
        case_insensitive: bool,

        /// Maximum size of a remote template in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_RESPONSE_SIZE)]
        max_size: u64,
    },
}

/// How `inspect` prints the loaded template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable overview
    Summary,
    /// Full model as YAML
    Yaml,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            source,
            format,
            case_insensitive,
            max_size,
        } => inspect_command(&source, format, case_insensitive, max_size),
    }
}

/// Execute the inspect command.
fn inspect_command(
    source: &str,
    format: OutputFormat,
    case_insensitive: bool,
    max_size: u64,
) -> Result<()> {
    let options = TemplaterOptions {
        loader: LoaderOptions {
            max_response_size: max_size,
            ..LoaderOptions::default()
        },
        attribute_case: if case_insensitive {
            AttributeCase::Insensitive
        } else {
            AttributeCase::UpperOrLower
        },
    };
    let mut templater = Templater::with_options(options);

    // Only remote loads take long enough to warrant a spinner.
    let pb = is_remote_source(source).then(|| {
        let pb = ProgressBar::new_spinner();
        #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("valid template"),
        );
        pb.set_message(format!("Fetching {source}..."));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    });

    let result = templater.load_template(source);
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    result?;

    let model = masked(templater.into_model());
    match format {
        OutputFormat::Yaml => print!("{}", generate_yaml(&model)?),
        OutputFormat::Summary => print_summary(source, &model),
    }

    Ok(())
}

/// Replace server passwords so they never reach the terminal.
fn masked(mut model: TemplateModel) -> TemplateModel {
    for server in &mut model.smtp_servers {
        if server.password.is_some() {
            server.password = Some("********".to_string());
        }
    }
    model
}

fn format_addresses(addresses: &[Address]) -> String {
    if addresses.is_empty() {
        return style("(none)").dim().to_string();
    }
    addresses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_summary(source: &str, model: &TemplateModel) {
    let message = &model.message;

    println!("{} {}", style("Template").bold(), style(source).cyan());
    println!();
    println!("  Priority: {}", message.priority);
    if let Some(from) = &message.from {
        println!("  From: {}", style(from).green());
    }
    if let Some(reply_to) = &message.reply_to {
        println!("  Reply-To: {reply_to}");
    }
    if let Some(receipt) = &message.return_receipt {
        println!("  Return-Receipt: {receipt}");
    }
    println!("  To: {}", format_addresses(&message.to));
    println!("  Cc: {}", format_addresses(&message.cc));
    println!("  Bcc: {}", format_addresses(&message.bcc));
    println!("  Subject: {}", style(&message.subject).green());
    println!("  HTML body: {} bytes", message.body_html.len());
    println!("  Text body: {} bytes", message.body_text.len());
    println!();

    println!("  Field formats: {}", model.field_formats.len());
    for format in &model.field_formats {
        println!(
            "    - {} (width {}, pad '{}' {:?})",
            style(&format.name).cyan(),
            format.total_width,
            format.padding_char,
            format.padding_direction
        );
    }

    println!("  Regions: {}", model.regions.len());
    for region in &model.regions {
        println!("    - {}", style(&region.region_id).cyan());
    }

    println!("  Conditions: {}", model.conditions.len());
    for condition in &model.conditions {
        println!(
            "    - {}: {} {:?} '{}'",
            style(&condition.region_id).cyan(),
            condition.field,
            condition.operator,
            condition.value
        );
    }

    println!("  List templates: {}", model.list_templates.len());
    for template in &model.list_templates {
        println!(
            "    - {} ({} bytes)",
            style(&template.name).cyan(),
            template.body.len()
        );
    }

    println!("  SMTP servers: {}", model.smtp_servers.len());
    for server in &model.smtp_servers {
        let user = server
            .username
            .as_deref()
            .map(|u| format!(" as {u}"))
            .unwrap_or_default();
        println!("    - {}:{}{}", style(&server.host).cyan(), server.port, user);
    }
}
