pub mod particles;
pub mod typewriter;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EffectError {
    #[error("typewriter script has nothing to type")]
    EmptyScript,
    #[error("element `#{0}` is not in the document")]
    MissingElement(String),
    #[error("canvas 2d context is unavailable")]
    NoCanvasContext,
}
