use std::path::Path;

/// Import path used by components living next to the `shared` directory.
pub const SAME_LEVEL: &str = "./shared/DataTableConfig";
/// Import path used by components one directory below it.
pub const PARENT_LEVEL: &str = "../shared/DataTableConfig";

/// Both import paths under which a component may already reference the
/// shared configuration.
pub const SHARED_CONFIG_IMPORT_PATHS: [&str; 2] = [SAME_LEVEL, PARENT_LEVEL];

/// Picks the relative import path of the shared configuration for `path`.
///
/// Components under a `users` directory (any case) sit one level deeper
/// than the rest, so they have to go up first.
pub fn shared_config_import_path(path: &Path) -> &'static str {
    let in_users_dir = path
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .any(|component| component.as_os_str().eq_ignore_ascii_case("users"));
    if in_users_dir { PARENT_LEVEL } else { SAME_LEVEL }
}
