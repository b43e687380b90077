fn main() -> anyhow::Result<()> {
    history_omnibox::cli::run()
}
