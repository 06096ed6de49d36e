pub mod party;
pub mod run;
pub mod senator;
