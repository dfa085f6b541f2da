use std::{fs, sync::LazyLock};

use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigError, File};

/// Gets the default path of the inventory store file.
///
/// This function reads from the data configuration file and replaces the
/// `%%AppDataDirectory%%` placeholder with the actual application data
/// directory path. The file itself is not created; an absent store file is
/// equivalent to an empty store.
///
/// # Panics
///
/// Panics if the data configuration cannot be loaded, the inventory_file
/// setting is missing, or if there are filesystem errors creating the
/// application data directory.
pub fn get_default_inventory_file() -> Utf8PathBuf {
    let data_config = get_data_config().expect("Failed to load data config");

    Utf8PathBuf::from(data_config.get_string("inventory_file")
        .expect("Failed to get inventory file from data config")
        .replace("%%AppDataDirectory%%", get_app_folder().as_str()))
}

/// Gets the fixed path of the number list store file.
///
/// Same placeholder substitution as [`get_default_inventory_file`]. The list
/// utility has no path override flag; this is the one location it uses.
///
/// # Panics
///
/// Panics if the data configuration cannot be loaded, the list_file setting
/// is missing, or if there are filesystem errors creating the application
/// data directory.
pub fn get_default_list_file() -> Utf8PathBuf {
    let data_config = get_data_config().expect("Failed to load data config");

    Utf8PathBuf::from(data_config.get_string("list_file")
        .expect("Failed to get list file from data config")
        .replace("%%AppDataDirectory%%", get_app_folder().as_str()))
}

fn get_data_config() -> Result<Config, ConfigError> {
    let config_file_path = get_app_folder().join("data.toml");
    if !fs::exists(&config_file_path).expect("Error while checking if data config file exists") {
        // If the data.toml file does not exist, create it with default values
        fs::write(&config_file_path, DEFAULT_DATA_CONFIG_BYTES).expect("Failed to create default data.toml");
    }

    Config::builder()
        .add_source(File::with_name(config_file_path.as_str()))
        .build()
}

fn get_app_folder() -> &'static Utf8Path {
    let folder: &'static Utf8PathBuf = &APP_FOLDER;
    if !fs::exists(folder).expect("Error while determining if app data directory exists") {
            fs::create_dir_all(folder).expect("Failed to create local data directory");
    }
    folder.as_path()
}

// Private constants and functions
const DEFAULT_DATA_CONFIG_BYTES: &[u8] = include_bytes!("../artifacts/defaults/data.toml");

static APP_FOLDER: LazyLock<Utf8PathBuf> = LazyLock::new(|| Utf8PathBuf::from_path_buf(dirs::data_local_dir()
            .expect("Failed to get local data directory"))
            .expect("Local data directory is not a valid UTF-8 path")
            .join("tally"));
