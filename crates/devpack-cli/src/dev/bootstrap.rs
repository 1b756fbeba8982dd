//! Dev server bootstrap.
//!
//! Resolves the port, writes it into the configuration and appends the
//! friendly-errors reporter and the bundle analyzer. The resolved port is
//! returned to the caller rather than written to the process environment.

use std::sync::Arc;

use devpack_config::{
    AnalyzerLogLevel, BundleAnalyzerOptions, BundlerConfig, CompilationSuccessInfo, DevEnv,
    FriendlyErrorsOptions, Plugin,
};

use crate::dev::notifier::{notifier_callback, DesktopNotifier, Notifier};
use crate::dev::port::{PortFinder, TcpPortFinder};
use crate::error::DevServerError;

/// A finalized development configuration.
#[derive(Debug, Clone)]
pub struct DevServer {
    pub config: BundlerConfig,

    /// Port the dev server will listen on.
    pub port: u16,

    /// Port the bundle analyzer will listen on (`port + 1`).
    pub analyzer_port: u16,

    /// Lines shown once compilation succeeds.
    pub messages: Vec<String>,
}

impl DevServer {
    /// The friendly-errors reporter wired to the notifier.
    pub fn error_reporter(&self) -> Option<&FriendlyErrorsOptions> {
        self.config.plugins.iter().rev().find_map(|plugin| match plugin {
            Plugin::FriendlyErrors(opts) if opts.on_errors.is_some() => Some(opts),
            _ => None,
        })
    }
}

pub struct Bootstrapper {
    env: DevEnv,
    finder: Box<dyn PortFinder>,
    notifier: Arc<dyn Notifier>,
}

impl Bootstrapper {
    /// Bootstrapper that probes TCP ports on the configured host and sends
    /// desktop notifications.
    pub fn new(env: DevEnv) -> Self {
        let finder = TcpPortFinder::new(env.host.clone());
        Self {
            env,
            finder: Box::new(finder),
            notifier: Arc::new(DesktopNotifier),
        }
    }

    pub fn with_port_finder(mut self, finder: impl PortFinder + 'static) -> Self {
        self.finder = Box::new(finder);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Resolve the port and finalize `config`.
    ///
    /// # Errors
    ///
    /// Fails when no port can be found. Nothing is written to `config`
    /// before the port is known.
    pub async fn create_dev_server(
        &self,
        mut config: BundlerConfig,
    ) -> Result<DevServer, DevServerError> {
        let port = self.finder.find_port(self.env.port).await?;
        let analyzer_port = port
            .checked_add(1)
            .ok_or(DevServerError::NoAnalyzerPort(port))?;

        config.dev_server_mut().port = port;

        let messages = success_messages(&self.env, port, analyzer_port);

        config.plugins.push(Plugin::FriendlyErrors(FriendlyErrorsOptions {
            compilation_success_info: Some(CompilationSuccessInfo {
                messages: messages.clone(),
                notes: Vec::new(),
            }),
            on_errors: Some(notifier_callback(Arc::clone(&self.notifier))),
        }));

        config.plugins.push(Plugin::BundleAnalyzer(BundleAnalyzerOptions {
            analyzer_port,
            open_analyzer: false,
            log_level: AnalyzerLogLevel::Silent,
        }));

        tracing::debug!(port, analyzer_port, "dev server configured");

        Ok(DevServer {
            config,
            port,
            analyzer_port,
            messages,
        })
    }
}

/// Finalize `config` with a TCP port finder and desktop notifications.
pub async fn create_dev_server(
    config: BundlerConfig,
    env: &DevEnv,
) -> Result<DevServer, DevServerError> {
    Bootstrapper::new(env.clone()).create_dev_server(config).await
}

/// Success lines printed once the dev server is up.
pub fn success_messages(env: &DevEnv, port: u16, analyzer_port: u16) -> Vec<String> {
    let mut messages = vec![
        format!("Your application is running at {}", env.url(port)),
        format!("Webpack Analyzer is running at {}", env.url(analyzer_port)),
    ];

    if let Some((path, host)) = env.proxy() {
        messages.push(format!("Proxying requests matching {} to {}", path, host));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::notifier::Notification;
    use async_trait::async_trait;
    use devpack_config::{build_config, BuildOptions, CompileError, Severity};
    use std::io;
    use std::sync::Mutex;

    struct FixedPort(u16);

    #[async_trait]
    impl PortFinder for FixedPort {
        async fn find_port(&self, _base_port: u16) -> Result<u16, DevServerError> {
            Ok(self.0)
        }
    }

    struct NoPort;

    #[async_trait]
    impl PortFinder for NoPort {
        async fn find_port(&self, base_port: u16) -> Result<u16, DevServerError> {
            Err(DevServerError::PortUnavailable {
                start: base_port,
                end: base_port,
            })
        }
    }

    #[derive(Default)]
    struct Recording(Mutex<Vec<Notification>>);

    impl Notifier for Recording {
        fn notify(&self, notification: &Notification) -> io::Result<()> {
            self.0.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    fn dev_config(env: &DevEnv) -> BundlerConfig {
        build_config(&BundlerConfig::default(), env, &BuildOptions::default())
    }

    fn bootstrapper(env: &DevEnv, port: u16) -> Bootstrapper {
        Bootstrapper::new(env.clone())
            .with_port_finder(FixedPort(port))
            .with_notifier(Arc::new(Recording::default()))
    }

    #[tokio::test]
    async fn test_busy_base_port_example() {
        let env = DevEnv::default();
        let server = bootstrapper(&env, 8081)
            .create_dev_server(dev_config(&env))
            .await
            .unwrap();

        assert_eq!(server.port, 8081);
        assert_eq!(server.analyzer_port, 8082);
        assert_eq!(server.config.dev_server.as_ref().unwrap().port, 8081);
        assert_eq!(
            server.messages,
            vec![
                "Your application is running at http://localhost:8081".to_string(),
                "Webpack Analyzer is running at http://localhost:8082".to_string(),
            ]
        );

        match server.config.plugins.last() {
            Some(Plugin::BundleAnalyzer(opts)) => {
                assert_eq!(opts.analyzer_port, 8082);
                assert!(!opts.open_analyzer);
                assert_eq!(opts.log_level, AnalyzerLogLevel::Silent);
            }
            other => panic!("expected analyzer plugin, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_appends_reporter_then_analyzer() {
        let env = DevEnv::default();
        let server = bootstrapper(&env, 9000)
            .create_dev_server(dev_config(&env))
            .await
            .unwrap();

        let names: Vec<_> = server.config.plugins.iter().map(Plugin::name).collect();
        assert_eq!(
            names,
            vec![
                "HotModuleReplacementPlugin",
                "NamedModulesPlugin",
                "NoEmitOnErrorsPlugin",
                "HtmlWebpackPlugin",
                "FriendlyErrorsPlugin",
                "FriendlyErrorsPlugin",
                "BundleAnalyzerPlugin",
            ]
        );

        let reporter = server.error_reporter().expect("reporter");
        let info = reporter.compilation_success_info.as_ref().unwrap();
        assert_eq!(info.messages, server.messages);
    }

    #[tokio::test]
    async fn test_proxy_message_when_configured() {
        let env = DevEnv {
            proxy_host: Some("http://backend:5000".into()),
            ..DevEnv::default()
        };
        let server = bootstrapper(&env, 8080)
            .create_dev_server(dev_config(&env))
            .await
            .unwrap();

        assert_eq!(server.messages.len(), 3);
        assert_eq!(
            server.messages[2],
            "Proxying requests matching /*api/** to http://backend:5000"
        );
    }

    #[tokio::test]
    async fn test_creates_dev_server_block_when_missing() {
        let env = DevEnv::default();
        let server = bootstrapper(&env, 4000)
            .create_dev_server(BundlerConfig::default())
            .await
            .unwrap();

        assert_eq!(server.config.dev_server.unwrap().port, 4000);
    }

    #[tokio::test]
    async fn test_port_failure_is_returned() {
        let env = DevEnv::default();
        let result = Bootstrapper::new(env.clone())
            .with_port_finder(NoPort)
            .create_dev_server(dev_config(&env))
            .await;

        assert!(matches!(
            result,
            Err(DevServerError::PortUnavailable { start: 8080, .. })
        ));
    }

    #[tokio::test]
    async fn test_last_port_has_no_analyzer_port() {
        let env = DevEnv::default();
        let result = bootstrapper(&env, u16::MAX)
            .create_dev_server(dev_config(&env))
            .await;

        assert!(matches!(result, Err(DevServerError::NoAnalyzerPort(65535))));
    }

    #[tokio::test]
    async fn test_reporter_forwards_errors_to_notifier() {
        let env = DevEnv::default();
        let recorder = Arc::new(Recording::default());
        let server = Bootstrapper::new(env.clone())
            .with_port_finder(FixedPort(8080))
            .with_notifier(recorder.clone())
            .create_dev_server(dev_config(&env))
            .await
            .unwrap();

        let reporter = server.error_reporter().unwrap();
        let errors = [CompileError {
            file: Some("babel-loader!src/App.js".into()),
            ..Default::default()
        }];
        reporter.report(Severity::Warning, &errors);
        reporter.report(Severity::Error, &errors);

        let sent = recorder.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subtitle, "App.js");
    }
}
