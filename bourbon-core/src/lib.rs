pub type Error = anyhow::Error;

/// Per-process framework data. Moderation handlers are stateless, so this
/// carries nothing beyond what poise requires.
#[derive(Clone, Debug, Default)]
pub struct Data;

pub type Context<'a> = poise::Context<'a, Data, Error>;
