pub mod apply;
pub mod commit;
pub mod propose;
pub mod run;
pub mod summarize;
