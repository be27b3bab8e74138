fn main() -> anyhow::Result<()> {
    fixturegen_cli::run()?;
    Ok(())
}
