mod merge;

pub use merge::{merge_paths, MergePart, MergePaths};
