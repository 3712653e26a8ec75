pub mod reformat;
