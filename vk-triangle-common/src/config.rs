use clap::{App, Arg, ArgMatches};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

pub struct Configs {
    pub prog_name: String,
    pub list: bool,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub validation: bool,
    pub debug_mode: bool,
}

impl Configs {
    pub fn new(name: &'static str) -> Configs {
        Configs::from(name, create_app(name).get_matches())
    }

    /// Parses an explicit argument list; the first item is the program name.
    pub fn from_args<I, T>(name: &'static str, args: I) -> Configs
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Configs::from(name, create_app(name).get_matches_from(args))
    }

    fn from<'a>(name: &'static str, args: ArgMatches<'a>) -> Configs {
        Configs {
            prog_name: String::from(name),
            list: args.is_present("list"),
            width: args
                .value_of("width")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_WIDTH),
            height: args
                .value_of("height")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HEIGHT),
            fullscreen: args.is_present("fullscreen"),
            validation: args.is_present("validation")
                || (cfg!(debug_assertions) && !args.is_present("no-validation")),
            debug_mode: args.is_present("debug"),
        }
    }
}

fn create_app<'a, 'b, S: Into<String>>(name: S) -> App<'a, 'b> {
    App::new(name)
        .arg(
            Arg::with_name("list")
                .long("list")
                .short("l")
                .help("also print every extension each device offers"),
        )
        .arg(
            Arg::with_name("validation")
                .long("validation")
                .short("v")
                .help("use VK_LAYER_KHRONOS_validation"),
        )
        .arg(
            Arg::with_name("no-validation")
                .long("no-validation")
                .conflicts_with("validation")
                .help("disable validation layers in debug builds"),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .takes_value(true)
                .help("window width")
                .default_value("800"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .help("window height")
                .default_value("600"),
        )
        .arg(
            Arg::with_name("fullscreen")
                .long("fullscreen")
                .short("f")
                .help("fullscreen"),
        )
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .short("g")
                .help("report verbose and info validation messages"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configs::from_args("test", vec!["test"]);
        assert_eq!(config.prog_name, "test");
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert!(!config.list);
        assert!(!config.fullscreen);
        assert!(!config.debug_mode);
        assert_eq!(config.validation, cfg!(debug_assertions));
    }

    #[test]
    fn explicit_values() {
        let config = Configs::from_args(
            "test",
            vec!["test", "--width", "1024", "--height", "768", "-l", "-f", "-g"],
        );
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert!(config.list);
        assert!(config.fullscreen);
        assert!(config.debug_mode);
    }

    #[test]
    fn unparsable_size_falls_back() {
        let config = Configs::from_args("test", vec!["test", "--width", "wide"]);
        assert_eq!(config.width, DEFAULT_WIDTH);
    }

    #[test]
    fn validation_switches() {
        assert!(Configs::from_args("test", vec!["test", "--validation"]).validation);
        assert!(!Configs::from_args("test", vec!["test", "--no-validation"]).validation);
    }
}
