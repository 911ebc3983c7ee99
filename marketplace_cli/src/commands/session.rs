use anyhow::Result;
use clap::Args;
use marketplace_lib::{FileStore, Session};

#[derive(Args)]
pub struct LoginArgs {
    /// Bearer token issued by the marketplace backend
    #[arg(long)]
    pub token: String,
}

pub fn login(args: &LoginArgs, session: &Session<FileStore>) -> Result<()> {
    if args.token.trim().is_empty() {
        anyhow::bail!("token must not be empty");
    }
    session.save_token(&args.token)?;
    eprintln!("Token saved");
    Ok(())
}

pub fn logout(session: &Session<FileStore>) -> Result<()> {
    session.clear()?;
    eprintln!("Signed out");
    Ok(())
}
