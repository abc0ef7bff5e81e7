//! xtask - Build tasks for GTC
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man pages, COMMANDS.md)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use gtc::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for GTC")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate man pages
        #[arg(long)]
        man: bool,

        /// Generate COMMANDS.md
        #[arg(long)]
        markdown: bool,

        /// Generate all formats (default if no specific format is specified)
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs {
            output,
            man,
            markdown,
            all,
        } => {
            // If no specific format is specified, generate all
            let gen_all = all || (!man && !markdown);

            if gen_all || man {
                generate_man_pages(&output)?;
            }
            if gen_all || markdown {
                generate_markdown(&output)?;
            }
        }
    }

    Ok(())
}

/// Generate man pages using clap_mangen
fn generate_man_pages(output: &Path) -> Result<()> {
    use clap_mangen::Man;

    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let cmd = Cli::command();

    // Generate main man page
    let man = Man::new(cmd.clone());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("gtc.1"), buffer)?;
    println!("Generated: {}/gtc.1", man_dir.display());

    // Generate man pages for subcommands
    for subcommand in cmd.get_subcommands() {
        if subcommand.is_hide_set() {
            continue;
        }

        let name = subcommand.get_name();
        let man = Man::new(subcommand.clone());
        let mut buffer = Vec::new();
        man.render(&mut buffer)?;
        fs::write(man_dir.join(format!("gtc-{}.1", name)), buffer)?;
        println!("Generated: {}/gtc-{}.1", man_dir.display(), name);

        // Generate man pages for nested subcommands
        for nested in subcommand.get_subcommands() {
            if nested.is_hide_set() {
                continue;
            }
            let nested_name = nested.get_name();
            let man = Man::new(nested.clone());
            let mut buffer = Vec::new();
            man.render(&mut buffer)?;
            fs::write(
                man_dir.join(format!("gtc-{}-{}.1", name, nested_name)),
                buffer,
            )?;
            println!(
                "Generated: {}/gtc-{}-{}.1",
                man_dir.display(),
                name,
                nested_name
            );
        }
    }

    println!("Man pages generated in {}", man_dir.display());
    Ok(())
}

/// Generate COMMANDS.md markdown documentation
fn generate_markdown(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let cmd = Cli::command();
    let mut markdown = String::new();

    // Header
    markdown.push_str("# GTC Command Reference\n\n");
    markdown.push_str("This document is auto-generated from the CLI definitions.\n\n");
    markdown.push_str("## Table of Contents\n\n");

    // Build TOC
    for subcommand in cmd.get_subcommands() {
        if subcommand.is_hide_set() {
            continue;
        }
        let name = subcommand.get_name();
        markdown.push_str(&format!("- [{}](#gtc-{})\n", name, name));
    }
    markdown.push_str("\n---\n\n");

    // Main command
    markdown.push_str("## gtc\n\n");
    if let Some(about) = cmd.get_about() {
        markdown.push_str(&format!("{}\n\n", about));
    }
    if let Some(long_about) = cmd.get_long_about() {
        markdown.push_str("```\n");
        markdown.push_str(&format!("{}\n", long_about));
        markdown.push_str("```\n\n");
    }

    // Subcommands
    for subcommand in cmd.get_subcommands() {
        if subcommand.is_hide_set() {
            continue;
        }

        let name = subcommand.get_name();
        markdown.push_str(&format!("## gtc {}\n\n", name));

        if let Some(about) = subcommand.get_about() {
            markdown.push_str(&format!("{}\n\n", about));
        }

        // Arguments
        let args: Vec<_> = subcommand.get_arguments().collect();
        if !args.is_empty() {
            let positional: Vec<_> = args.iter().filter(|a| a.is_positional()).collect();
            let options: Vec<_> = args.iter().filter(|a| !a.is_positional()).collect();

            if !positional.is_empty() {
                markdown.push_str("### Arguments\n\n");
                for arg in positional {
                    let arg_name = arg.get_id().as_str();
                    if arg_name == "help" || arg_name == "version" {
                        continue;
                    }
                    markdown.push_str(&format!("- `<{}>`: ", arg_name.to_uppercase()));
                    if let Some(help) = arg.get_help() {
                        markdown.push_str(&format!("{}", help));
                    }
                    markdown.push('\n');
                }
                markdown.push('\n');
            }

            if !options.is_empty() {
                let non_help: Vec<_> = options
                    .iter()
                    .filter(|a| {
                        let id = a.get_id().as_str();
                        id != "help" && id != "version"
                    })
                    .collect();

                if !non_help.is_empty() {
                    markdown.push_str("### Options\n\n");
                    for arg in non_help {
                        let long = arg.get_long().map(|l| format!("--{}", l));
                        let short = arg.get_short().map(|s| format!("-{}", s));
                        let flag = match (long, short) {
                            (Some(l), Some(s)) => format!("{}, {}", s, l),
                            (Some(l), None) => l,
                            (None, Some(s)) => s,
                            _ => continue,
                        };
                        markdown.push_str(&format!("- `{}`: ", flag));
                        if let Some(help) = arg.get_help() {
                            markdown.push_str(&format!("{}", help));
                        }
                        markdown.push('\n');
                    }
                    markdown.push('\n');
                }
            }
        }

        // Long description
        if let Some(long_about) = subcommand.get_long_about() {
            markdown.push_str("### Description\n\n");
            markdown.push_str("```\n");
            markdown.push_str(&format!("{}\n", long_about));
            markdown.push_str("```\n\n");
        }

        // Nested subcommands
        let nested: Vec<_> = subcommand.get_subcommands().collect();
        if !nested.is_empty() {
            markdown.push_str("### Subcommands\n\n");
            for nested_cmd in nested {
                if nested_cmd.is_hide_set() {
                    continue;
                }
                let nested_name = nested_cmd.get_name();
                markdown.push_str(&format!("#### gtc {} {}\n\n", name, nested_name));

                if let Some(about) = nested_cmd.get_about() {
                    markdown.push_str(&format!("{}\n\n", about));
                }

                if let Some(long_about) = nested_cmd.get_long_about() {
                    markdown.push_str("```\n");
                    markdown.push_str(&format!("{}\n", long_about));
                    markdown.push_str("```\n\n");
                }
            }
        }

        markdown.push_str("---\n\n");
    }

    // Footer
    markdown.push_str("\n*Generated by `cargo xtask gen-docs`*\n");

    let output_path = output.join("COMMANDS.md");
    fs::write(&output_path, markdown)?;
    println!("Generated: {}", output_path.display());

    Ok(())
}
