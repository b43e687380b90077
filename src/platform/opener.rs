use std::ffi::OsString;
use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

use crate::config::BrowserConfig;
use crate::omnibox::TabController;

/// How long to watch a launched opener for an early failure before detaching
pub const LAUNCH_WAIT: Duration = Duration::from_millis(1000);

/// Launches external programs (mocked in tests)
pub trait CommandRunner {
    /// Start `program` detached from the terminal. Returns its exit status if it
    /// ended within `wait`, or `None` if it is still running.
    fn launch(
        &self,
        program: &str,
        args: &[OsString],
        wait: Duration,
    ) -> io::Result<Option<ExitStatus>>;
}

#[derive(Debug, Default)]
pub struct ProcessCommandRunner;

impl CommandRunner for ProcessCommandRunner {
    fn launch(
        &self,
        program: &str,
        args: &[OsString],
        wait: Duration,
    ) -> io::Result<Option<ExitStatus>> {
        // A browser may outlive the popup; it must not hold our terminal or pipes
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let deadline = Instant::now() + wait;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                // Reap it in the background so it does not linger as a zombie
                thread::spawn(move || {
                    let _ = child.wait();
                });
                return Ok(None);
            }
            thread::sleep(Duration::from_millis(20));
        }
    }
}

/// Program and leading arguments used to open a url
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserCommand {
    pub program: String,
    pub current_tab_args: Vec<String>,
    pub new_tab_args: Vec<String>,
}

impl BrowserCommand {
    /// The configured command, or the platform opener for `target_os`
    pub fn resolve(config: &BrowserConfig, target_os: &str) -> Result<Self> {
        if let Some(program) = &config.command {
            return Ok(Self {
                program: program.clone(),
                current_tab_args: config.current_tab_args.clone(),
                new_tab_args: config.new_tab_args.clone(),
            });
        }

        // Platform openers cannot tell tabs apart; both modes share one invocation
        let (program, prefix): (&str, Vec<String>) = match target_os {
            "macos" => ("open", Vec::new()),
            "linux" | "freebsd" | "openbsd" | "netbsd" => ("xdg-open", Vec::new()),
            // Not `cmd /C start`: cmd.exe would interpret `&` and `|` inside the url
            "windows" => ("rundll32", vec!["url.dll,FileProtocolHandler".into()]),
            other => bail!(
                "No default url opener for `{}`; set [browser] command in the config file",
                other
            ),
        };
        Ok(Self {
            program: program.to_string(),
            current_tab_args: prefix.clone(),
            new_tab_args: prefix,
        })
    }

    fn args_for(&self, url: &str, new_tab: bool) -> Vec<OsString> {
        let prefix = if new_tab { &self.new_tab_args } else { &self.current_tab_args };
        prefix.iter().map(OsString::from).chain([OsString::from(url)]).collect()
    }
}

/// Tab controller backed by the system browser
pub struct SystemBrowser<R: CommandRunner = ProcessCommandRunner> {
    runner: R,
    command: BrowserCommand,
    current_url: Option<String>,
}

impl SystemBrowser<ProcessCommandRunner> {
    pub fn from_config(config: &BrowserConfig, current_url: Option<String>) -> Result<Self> {
        let command = BrowserCommand::resolve(config, std::env::consts::OS)?;
        Ok(Self::with_runner(ProcessCommandRunner, command, current_url))
    }
}

impl<R: CommandRunner> SystemBrowser<R> {
    pub fn with_runner(runner: R, command: BrowserCommand, current_url: Option<String>) -> Self {
        Self { runner, command, current_url }
    }

    pub fn command(&self) -> &BrowserCommand {
        &self.command
    }

    fn open(&self, url: &str, new_tab: bool) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            bail!("Cannot open an empty url");
        }

        let args = self.args_for_display(url, new_tab);
        debug!(program = %self.command.program, args = %args, "Opening url");

        let status = self
            .runner
            .launch(&self.command.program, &self.command.args_for(url, new_tab), LAUNCH_WAIT)
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => {
                    anyhow!("Browser command `{}` was not found", self.command.program)
                }
                _ => anyhow!("Failed to run browser command `{}`: {}", self.command.program, e),
            })?;

        match status {
            Some(status) if !status.success() => bail!(
                "Browser command failed (`{} {}`): {}",
                self.command.program,
                args,
                status
            ),
            Some(_) => Ok(()),
            None => {
                debug!(program = %self.command.program, "Browser still running; detached");
                Ok(())
            }
        }
    }

    fn args_for_display(&self, url: &str, new_tab: bool) -> String {
        self.command
            .args_for(url, new_tab)
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<R: CommandRunner> TabController for SystemBrowser<R> {
    fn update(&mut self, url: &str) -> Result<()> {
        self.open(url, false)
    }

    fn create(&mut self, url: &str) -> Result<()> {
        self.open(url, true)
    }

    fn active_url(&self) -> Option<String> {
        self.current_url.clone()
    }
}

/// Tab controller that prints the target instead of opening it
pub struct StdoutTabs<W: Write> {
    out: W,
}

impl<W: Write> StdoutTabs<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TabController for StdoutTabs<W> {
    fn update(&mut self, url: &str) -> Result<()> {
        writeln!(self.out, "{}", url).context("Failed to write navigation target")
    }

    fn create(&mut self, url: &str) -> Result<()> {
        writeln!(self.out, "{} (new tab)", url).context("Failed to write navigation target")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct FakeRunner {
        calls: RefCell<Vec<(String, Vec<String>)>>,
        result: fn() -> io::Result<Option<ExitStatus>>,
    }

    impl FakeRunner {
        fn new(result: fn() -> io::Result<Option<ExitStatus>>) -> Self {
            Self { calls: RefCell::new(Vec::new()), result }
        }
    }

    impl CommandRunner for FakeRunner {
        fn launch(
            &self,
            program: &str,
            args: &[OsString],
            _wait: Duration,
        ) -> io::Result<Option<ExitStatus>> {
            let args = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
            self.calls.borrow_mut().push((program.to_string(), args));
            (self.result)()
        }
    }

    #[cfg(unix)]
    fn exit(code: i32) -> Option<ExitStatus> {
        use std::os::unix::process::ExitStatusExt;
        Some(ExitStatus::from_raw(code << 8))
    }

    fn firefox() -> BrowserCommand {
        BrowserCommand {
            program: "firefox".to_string(),
            current_tab_args: Vec::new(),
            new_tab_args: vec!["--new-tab".to_string()],
        }
    }

    #[test]
    fn test_default_command_per_os() {
        let config = BrowserConfig::default();
        assert_eq!(BrowserCommand::resolve(&config, "linux").unwrap().program, "xdg-open");
        assert_eq!(BrowserCommand::resolve(&config, "macos").unwrap().program, "open");

        let windows = BrowserCommand::resolve(&config, "windows").unwrap();
        assert_eq!(windows.program, "rundll32");
        assert_eq!(
            windows.args_for("https://a.com", true),
            ["url.dll,FileProtocolHandler", "https://a.com"]
        );

        assert!(BrowserCommand::resolve(&config, "plan9").is_err());
    }

    #[test]
    fn test_configured_command_wins() {
        let config = BrowserConfig {
            command: Some("chromium".to_string()),
            current_tab_args: Vec::new(),
            new_tab_args: vec!["--new-window".to_string()],
        };
        let command = BrowserCommand::resolve(&config, "plan9").unwrap();
        assert_eq!(command.program, "chromium");
        assert_eq!(command.args_for("https://a.com", true), ["--new-window", "https://a.com"]);
        assert_eq!(command.args_for("https://a.com", false), ["https://a.com"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_update_and_create_use_tab_args() {
        let runner = FakeRunner::new(|| Ok(exit(0)));
        let mut browser = SystemBrowser::with_runner(runner, firefox(), None);

        browser.update("https://a.com").unwrap();
        browser.create("https://b.com").unwrap();

        let calls = browser.runner.calls.borrow();
        assert_eq!(calls[0], ("firefox".to_string(), vec!["https://a.com".to_string()]));
        assert_eq!(
            calls[1],
            ("firefox".to_string(), vec!["--new-tab".to_string(), "https://b.com".to_string()])
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_error() {
        let runner = FakeRunner::new(|| Ok(exit(3)));
        let mut browser = SystemBrowser::with_runner(runner, firefox(), None);

        let err = browser.update("https://a.com").unwrap_err().to_string();
        assert!(err.contains("Browser command failed"));
        assert!(err.contains("firefox https://a.com"));
    }

    #[test]
    fn test_still_running_browser_counts_as_opened() {
        let runner = FakeRunner::new(|| Ok(None));
        let mut browser = SystemBrowser::with_runner(runner, firefox(), None);

        assert!(browser.create("https://a.com").is_ok());
        assert_eq!(browser.runner.calls.borrow().len(), 1);
    }

    #[test]
    fn test_windows_opener_passes_url_as_one_argument() {
        let windows = BrowserCommand::resolve(&BrowserConfig::default(), "windows").unwrap();
        let url = "https://www.google.com/search?q=a&calc|more^x<y";

        let args = windows.args_for(url, false);
        assert_ne!(windows.program, "cmd");
        assert_eq!(args, ["url.dll,FileProtocolHandler", url]);
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_does_not_wait_for_long_lived_child() {
        let started = Instant::now();
        let status = ProcessCommandRunner
            .launch("sleep", &[OsString::from("5")], Duration::from_millis(100))
            .unwrap();

        assert!(status.is_none());
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_reports_early_exit() {
        let status = ProcessCommandRunner
            .launch("sh", &[OsString::from("-c"), OsString::from("exit 3")], Duration::from_secs(5))
            .unwrap();

        assert_eq!(status.and_then(|s| s.code()), Some(3));
    }

    #[test]
    fn test_missing_program_is_error() {
        let runner = FakeRunner::new(|| Err(io::Error::from(io::ErrorKind::NotFound)));
        let mut browser = SystemBrowser::with_runner(runner, firefox(), None);

        let err = browser.create("https://a.com").unwrap_err().to_string();
        assert!(err.contains("was not found"));
    }

    #[test]
    fn test_empty_url_rejected_without_running() {
        let runner = FakeRunner::new(|| Err(io::Error::from(io::ErrorKind::Other)));
        let mut browser = SystemBrowser::with_runner(runner, firefox(), None);

        assert!(browser.update("  ").is_err());
        assert!(browser.runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_active_url_from_startup() {
        let runner = FakeRunner::new(|| Err(io::Error::from(io::ErrorKind::Other)));
        let browser =
            SystemBrowser::with_runner(runner, firefox(), Some("https://docs.rs".to_string()));
        assert_eq!(browser.active_url().as_deref(), Some("https://docs.rs"));
    }

    #[test]
    fn test_stdout_tabs() {
        let mut tabs = StdoutTabs::new(Vec::new());
        tabs.update("https://a.com").unwrap();
        tabs.create("https://b.com").unwrap();

        let printed = String::from_utf8(tabs.into_inner()).unwrap();
        assert_eq!(printed, "https://a.com\nhttps://b.com (new tab)\n");
    }
}
