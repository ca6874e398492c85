use std::io;

use anyhow::Context;

use stockledger_shell::{Shell, ShellConfig};

fn main() -> anyhow::Result<()> {
    let config = ShellConfig::from_env().context("invalid configuration")?;
    stockledger_observability::init(config.log_format);

    let mut shell = Shell::new().with_prompt(config.prompt);

    let stdin = io::stdin();
    let stdout = io::stdout();
    shell
        .run(stdin.lock(), stdout.lock())
        .context("terminal I/O failed")?;

    Ok(())
}
