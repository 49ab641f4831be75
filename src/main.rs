use clap::Parser;
use form_builder::cli::commands::{
    cmd_add, cmd_flatten, cmd_forms, cmd_generate, cmd_import, cmd_options, cmd_outline, cmd_remove,
    cmd_rename, cmd_sandbox, cmd_set, CommandContext,
};
use form_builder::cli::config::{load_config, resolve_api_url, Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Saved-forms service: CLI > config > env > default
    let api_url = resolve_api_url(cli.api_url.as_deref(), &config);
    let ctx = CommandContext::new(&cli.file, cli.verbose, config, api_url);

    match &cli.command {
        Commands::Add { element_type, target } => cmd_add(&ctx, element_type, target)?,
        Commands::Remove { id } => cmd_remove(&ctx, id)?,
        Commands::Rename { id, name } => cmd_rename(&ctx, id, name)?,
        Commands::Set { id, key, value } => cmd_set(&ctx, id, key, value)?,
        Commands::Options { id, action } => cmd_options(&ctx, id, action)?,
        Commands::Import { input } => cmd_import(&ctx, input)?,
        Commands::Outline => cmd_outline(&ctx)?,
        Commands::Flatten => cmd_flatten(&ctx)?,
        Commands::Generate {
            language,
            name,
            output,
        } => cmd_generate(&ctx, language.as_deref(), name.as_deref(), output.as_deref())?,
        Commands::Sandbox {
            language,
            name,
            inspect,
        } => cmd_sandbox(&ctx, language.as_deref(), name.as_deref(), *inspect)?,
        Commands::Forms { action } => {
            let store = ctx.http_store();
            cmd_forms(&ctx, action, &store)?;
        }
    }

    Ok(())
}
