use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod replay;
mod resolve;
mod validate;

#[derive(From, Subcommand)]
pub enum Applet {
    Replay(replay::Replay),
    Resolve(resolve::Resolve),
    Validate(validate::Validate),
}

impl Default for Applet {
    fn default() -> Self {
        replay::Replay::default().into()
    }
}

impl Applet {
    pub fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Replay(a) => Ok(a.execute()?),
            Applet::Resolve(a) => Ok(a.execute()?),
            Applet::Validate(a) => Ok(a.execute()?),
        }
    }
}
