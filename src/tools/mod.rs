mod file_mover;
mod file_scanner;
mod identify_info;
mod path_validator;

pub use file_mover::{move_file, resolve_destination};
pub use file_scanner::{FileEntry, scan_root_files};
pub use identify_info::{DimensionReader, Dimensions, IdentifyReader};
pub use path_validator::{ensure_directory_exists, validate_directory_exists};
