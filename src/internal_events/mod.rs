#![allow(missing_docs)]

mod loading;
mod receiver;

pub use self::{loading::*, receiver::*};
