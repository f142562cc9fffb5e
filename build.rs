use clap::CommandFactory;
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::io::Result;
use std::path::PathBuf;

#[path = "src/cli.rs"]
#[allow(dead_code)]
mod cli;

use cli::Cli;

fn generate_completions(outdir: &std::ffi::OsString) -> Result<()> {
    let mut cmd = Cli::command();

    for shell in [
        Shell::Bash,
        Shell::Fish,
        Shell::Zsh,
        Shell::PowerShell,
        Shell::Elvish,
    ] {
        generate_to(shell, &mut cmd, "precheck", outdir)?;
    }

    Ok(())
}

fn generate_man_pages() -> Result<()> {
    let out_dir = PathBuf::from("target/man");
    fs::create_dir_all(&out_dir)?;

    let cmd = Cli::command();

    let mut buffer = Vec::new();
    Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(out_dir.join("precheck.1"), buffer)?;

    // One page per subcommand, named like git/cargo do (precheck-check.1)
    for subcommand in cmd.get_subcommands() {
        let subcommand_name = subcommand.get_name();
        if subcommand_name == "help" {
            continue;
        }

        let name = format!("precheck-{subcommand_name}");
        let mut buffer = Vec::new();
        Man::new(subcommand.clone())
            .title(&name)
            .render(&mut buffer)?;

        let content = String::from_utf8_lossy(&buffer).replace(
            &format!("\\fB{subcommand_name}\\fR"),
            &format!("\\fBprecheck {subcommand_name}\\fR"),
        );
        fs::write(out_dir.join(format!("{name}.1")), content.as_bytes())?;
    }

    Ok(())
}

fn main() -> Result<()> {
    if let Some(outdir) = env::var_os("OUT_DIR") {
        generate_completions(&outdir)?;
    }

    generate_man_pages()?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
