use once_cell::sync::OnceCell;

mkenv::make_config! {
    /// The environment used to set up a connection to the database.
    pub struct DbUrlEnv {
        /// The database URL.
        pub db_url: {
            var_name: "DATABASE_URL",
            layers: [
                or_default_val(|| "sqlite://registry.db?mode=rwc".to_owned()),
            ],
            description: "The URL to the SQLite, MySQL/MariaDB or PostgreSQL database",
            default_val_fmt: "sqlite://registry.db?mode=rwc",
        }
    }
}

mkenv::make_config! {
    /// The environment used to set up a connection to the database of the registry.
    pub struct DbEnv {
        /// The environment for the SQL database.
        pub db_url: { DbUrlEnv },
    }
}

mkenv::make_config! {
    /// The environment used by this crate.
    pub struct LibEnv {
        /// The image given to the categories and events created without one.
        pub default_image: {
            var_name: "REGISTRY_DEFAULT_IMAGE",
            layers: [
                or_default_val(|| "image1.jpg".to_owned()),
            ],
            description: "The file name of the image given to the categories and the events \
                created without one",
            default_val_fmt: "image1.jpg",
        },

        /// The name of the row counting the operations.
        pub counter_name: {
            var_name: "REGISTRY_COUNTER_NAME",
            layers: [
                or_default_val(|| entity::counters::DEFAULT_COUNTER_NAME.to_owned()),
            ],
            description: "The name of the row counting the add, update and delete operations",
            default_val_fmt: "Category-Event counter",
        },
    }
}

static ENV: OnceCell<LibEnv> = OnceCell::new();

/// Initializes the provided library environment as global.
///
/// If this function has already been called, the provided environment will be ignored.
pub fn init_env(env: LibEnv) {
    let _ = ENV.set(env);
}

/// Returns a static reference to the global library environment.
///
/// **Caution**: To use this function, the [`init_env()`] function must have been called at the start
/// of the program.
pub fn env() -> &'static LibEnv {
    ENV.get().unwrap()
}
