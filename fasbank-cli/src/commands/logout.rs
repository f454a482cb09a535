//! Logout command

use anyhow::Result;

use super::get_context;
use crate::output;

pub fn run() -> Result<()> {
    let ctx = get_context()?;
    ctx.session_service.logout()?;
    output::success("Logged out");
    Ok(())
}
