mod track;

pub use track::Track;
