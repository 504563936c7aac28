use mkenv::{error::ConfigInitError, prelude::*};
use once_cell::sync::OnceCell;
use registry_lib::{DbEnv, LibEnv};

mkenv::make_config! {
    pub struct ApiEnv {
        pub db_env: { DbEnv },

        pub port: {
            var_name: "REGISTRY_API_PORT",
            layers: [
                parsed_from_str<u16>(),
                or_default_val(|| 8080),
            ],
            description: "The port used to expose the API",
            default_val_fmt: "8080",
        },

        pub host: {
            var_name: "REGISTRY_API_HOST",
            layers: [
                or_default_val(|| "0.0.0.0".to_owned()),
            ],
            description: "The address the server is bound to",
            default_val_fmt: "0.0.0.0",
        },

        pub images_dir: {
            var_name: "REGISTRY_IMAGES_DIR",
            layers: [
                or_default_val(|| "images".to_owned()),
            ],
            description: "The path to the directory containing the images, served under /images",
            default_val_fmt: "images",
        },

        pub css_dir: {
            var_name: "REGISTRY_CSS_DIR",
            layers: [
                or_default_val(|| "css".to_owned()),
            ],
            description: "The path to the directory containing the stylesheets, served under /css",
            default_val_fmt: "css",
        },

        pub fallback_image: {
            var_name: "REGISTRY_FALLBACK_IMAGE",
            layers: [
                or_default_val(|| "default.jpg".to_owned()),
            ],
            description: "The image used by the pages when the submitted one doesn't exist \
                in the images directory",
            default_val_fmt: "default.jpg",
        },
    }
}

static ENV: OnceCell<ApiEnv> = OnceCell::new();

pub fn env() -> &'static ApiEnv {
    ENV.get().unwrap()
}

/// Initializes the environment of the server and of the library, from the environment variables.
///
/// If the environment has already been initialized, this function doesn't change it.
pub fn init_env() -> anyhow::Result<()> {
    fn map_err(err: ConfigInitError<'_>) -> anyhow::Error {
        anyhow::anyhow!("{err}")
    }

    let env = ApiEnv::define();
    let lib_env = LibEnv::define();
    env.try_init().map_err(map_err)?;
    lib_env.try_init().map_err(map_err)?;
    registry_lib::init_env(lib_env);
    let _ = ENV.set(env);

    Ok(())
}
