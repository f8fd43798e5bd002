//! Demonstration scenarios
//!
//! Each scenario drives one component through the [`Provisioner`] the way an
//! application would and records what happened. Expected failures (an
//! unknown backend, an incomplete builder) are checked, not just printed.

use crate::error::{ErrorKind, ProvisionError};
use crate::provisioner::{Provisioner, ADMIN_TEMPLATE, REPORT_TEMPLATE};
use provision_adapter::{FileStore, NotificationRoute, StorageRoute};
use provision_registry::{Capability, DatabaseKind, NotificationKind, Notifier, PaymentKind, RoleKind};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Selectable scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Demo {
    /// Variant registries and factory-method clients
    Factory,
    /// Validated builders
    Builder,
    /// Template cloning
    Prototype,
    /// Singleton slots
    Singleton,
    /// Adapters and routing
    Adapter,
    /// Every scenario in order
    All,
}

impl Demo {
    /// Individual scenarios in run order
    pub const SCENARIOS: &'static [Demo] = &[
        Demo::Factory,
        Demo::Builder,
        Demo::Prototype,
        Demo::Singleton,
        Demo::Adapter,
    ];

    /// Names accepted by [`FromStr`]
    pub const NAMES: &'static [&'static str] =
        &["factory", "builder", "prototype", "singleton", "adapter", "all"];

    /// Stable name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Factory => "factory",
            Self::Builder => "builder",
            Self::Prototype => "prototype",
            Self::Singleton => "singleton",
            Self::Adapter => "adapter",
            Self::All => "all",
        }
    }

    fn expand(self) -> Vec<Demo> {
        match self {
            Self::All => Self::SCENARIOS.to_vec(),
            single => vec![single],
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown scenario name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown demo `{0}`")]
pub struct UnknownDemo(pub String);

impl FromStr for Demo {
    type Err = UnknownDemo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "factory" => Ok(Self::Factory),
            "builder" => Ok(Self::Builder),
            "prototype" => Ok(Self::Prototype),
            "singleton" => Ok(Self::Singleton),
            "adapter" => Ok(Self::Adapter),
            "all" => Ok(Self::All),
            other => Err(UnknownDemo(other.to_string())),
        }
    }
}

/// Outcome of one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// Scenario
    pub demo: Demo,
    /// What happened, in order
    pub lines: Vec<String>,
    /// Checks that did not hold
    pub failures: Vec<String>,
    /// Error that aborted the scenario
    pub error: Option<String>,
    /// Classification of `error`
    pub error_kind: Option<ErrorKind>,
}

impl ScenarioReport {
    /// Check if the scenario ran to completion and every check held
    #[must_use]
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.failures.is_empty()
    }
}

/// Outcome of a demo run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoReport {
    /// Per-scenario outcomes in run order
    pub scenarios: Vec<ScenarioReport>,
}

impl DemoReport {
    /// Check if every scenario passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.scenarios.iter().all(ScenarioReport::passed)
    }

    /// Plain-text rendering
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut out = String::new();
        for scenario in &self.scenarios {
            let status = if scenario.passed() { "PASS" } else { "FAIL" };
            out.push_str(&format!("== {} [{status}]\n", scenario.demo));
            for line in &scenario.lines {
                out.push_str(&format!("  {line}\n"));
            }
            for failure in &scenario.failures {
                out.push_str(&format!("  check failed: {failure}\n"));
            }
            if let Some(error) = &scenario.error {
                out.push_str(&format!("  error: {error}\n"));
            }
        }
        let passed = self.scenarios.iter().filter(|s| s.passed()).count();
        out.push_str(&format!("{passed}/{} scenarios passed\n", self.scenarios.len()));
        out
    }
}

#[derive(Default)]
struct Transcript {
    lines: Vec<String>,
    failures: Vec<String>,
}

impl Transcript {
    fn note(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn check(&mut self, holds: bool, what: impl Into<String>) {
        if !holds {
            self.failures.push(what.into());
        }
    }

    fn expect_error<T>(&mut self, what: &str, result: Result<T, ProvisionError>, kind: ErrorKind) {
        match result {
            Ok(_) => self.failures.push(format!("{what}: expected {kind}, succeeded")),
            Err(err) if err.kind() == kind => self.note(format!("{what}: rejected ({err})")),
            Err(err) => self
                .failures
                .push(format!("{what}: expected {kind}, got {}", err.kind())),
        }
    }
}

/// Run `demo` against `provisioner`
#[must_use]
pub fn run_demo(provisioner: &Provisioner, demo: Demo) -> DemoReport {
    let scenarios = demo
        .expand()
        .into_iter()
        .map(|demo| run_scenario(provisioner, demo))
        .collect();
    DemoReport { scenarios }
}

fn run_scenario(provisioner: &Provisioner, demo: Demo) -> ScenarioReport {
    let _span = tracing::info_span!("demo", scenario = %demo).entered();
    let mut transcript = Transcript::default();
    let result = match demo {
        Demo::Factory => factory(provisioner, &mut transcript),
        Demo::Builder => builder(provisioner, &mut transcript),
        Demo::Prototype => prototype(provisioner, &mut transcript),
        Demo::Singleton => singleton(provisioner, &mut transcript),
        Demo::Adapter => adapter(provisioner, &mut transcript),
        Demo::All => Ok(()),
    };

    if let Err(err) = &result {
        tracing::warn!(error = %err, "scenario aborted");
    }
    ScenarioReport {
        demo,
        lines: transcript.lines,
        failures: transcript.failures,
        error_kind: result.as_ref().err().map(ProvisionError::kind),
        error: result.err().map(|err| err.to_string()),
    }
}

fn factory(p: &Provisioner, t: &mut Transcript) -> Result<(), ProvisionError> {
    for (kind, statement) in [
        (DatabaseKind::MySql, "SELECT * FROM users;"),
        (DatabaseKind::Postgres, "SELECT * FROM customers;"),
    ] {
        let outcome = p.database_client(kind)?.run_query(statement);
        t.check(outcome.backend == kind.as_str(), format!("{kind} query ran on {}", outcome.backend));
        t.note(format!("{}: {}", outcome.backend, outcome.statement));
    }
    t.expect_error("oracle", p.database_client_named("oracle"), ErrorKind::UnknownSelector);

    for (kind, amount) in [(PaymentKind::Stripe, 100.0), (PaymentKind::PayPal, 50.0)] {
        let receipt = p.payment_client(kind)?.pay(amount)?;
        t.note(format!("{}: charged {:.2} via {}", receipt.processor, receipt.amount, receipt.method));
    }
    t.expect_error(
        "negative payment",
        p.payment_client(PaymentKind::Stripe)?.pay(-5.0).map_err(ProvisionError::from),
        ErrorKind::InvalidAmount,
    );

    let dispatcher = p.dispatcher();
    for kind in NotificationKind::ALL {
        let delivery = dispatcher.send(*kind, "Purchase complete.")?;
        t.check(delivery.channel == kind.as_str(), format!("{kind} delivered via {}", delivery.channel));
        t.note(format!("{}: {}", delivery.channel, delivery.message));
    }

    let gate = p.access_gate();
    for kind in RoleKind::ALL {
        t.note(format!("{kind}: {}", gate.access(*kind)?));
    }
    Ok(())
}

fn builder(p: &Provisioner, t: &mut Transcript) -> Result<(), ProvisionError> {
    let request = p
        .http_request()
        .set("url", "https://api.example.com/resource")?
        .set("method", "POST")?
        .insert_entry("headers", "Content-Type", "application/json")?
        .set("body", r#"{"key":"value"}"#)?
        .build()?;
    let summary = request.send();
    t.note(format!(
        "{} ({} headers, {} byte body)",
        summary.line, summary.header_count, summary.body_len
    ));

    let mut db = p.database_config();
    db.set("host", "localhost")?
        .set("port", 8080)?
        .set("user", "admin")?
        .set("password", "password")?;
    let plain = db.build()?;
    db.set("ssl", true)?;
    let secure = db.build()?;
    t.check(!plain.ssl() && secure.ssl(), "builder reuse changes only ssl");
    t.note(format!("connect {} ssl={}", plain.connect().address, plain.ssl()));
    t.note(format!("connect {} ssl={}", secure.connect().address, secure.ssl()));

    let mut partial = p.database_config();
    partial.set("host", "localhost")?;
    t.expect_error("host only", partial.build().map_err(ProvisionError::from), ErrorKind::IncompleteBuilder);
    t.expect_error(
        "unknown field",
        partial.set("hostname", "x").map(|_| ()).map_err(ProvisionError::from),
        ErrorKind::UnknownField,
    );
    t.expect_error(
        "port as text",
        partial.set("port", "5432").map(|_| ()).map_err(ProvisionError::from),
        ErrorKind::InvalidFieldType,
    );
    Ok(())
}

fn prototype(p: &Provisioner, t: &mut Transcript) -> Result<(), ProvisionError> {
    let original = p.documents().clone_template(REPORT_TEMPLATE)?;
    let mut draft = p
        .documents()
        .clone_template(REPORT_TEMPLATE)?
        .with_title("Cloned Document")
        .with_author("John Smith");
    if let Some(section) = draft.sections_mut().first_mut() {
        section.body.push_str("Revenue up 12%.");
    }
    let fresh = p.documents().clone_template(REPORT_TEMPLATE)?;
    t.check(fresh == original, "report template unchanged after editing a clone");
    t.note(format!("template: {}", fresh.summary()));
    t.note(format!("clone:    {}", draft.summary()));

    let mut user = p.users().clone_template(ADMIN_TEMPLATE)?.with_username("janedoe");
    user.grant("audit");
    let template = p.users().clone_template(ADMIN_TEMPLATE)?;
    t.check(!template.has_permission("audit"), "admin template did not gain a permission");
    t.note(format!("{}: {}", user.username(), user.permissions().join(", ")));
    t.note(format!("{}: {}", template.username(), template.permissions().join(", ")));

    t.expect_error(
        "missing template",
        p.documents().clone_template("invoice").map_err(ProvisionError::from),
        ErrorKind::UnknownTemplateName,
    );
    Ok(())
}

fn singleton(p: &Provisioner, t: &mut Transcript) -> Result<(), ProvisionError> {
    let first = p.audit_log()?;
    let second = p.audit_log()?;
    let before = first.len();
    first.log("This is a log message");
    second.log("This is another log message");

    t.check(Arc::ptr_eq(&first, &second), "both handles share one audit log");
    t.check(second.len() == before + 2, "entries from both handles accumulate");
    for entry in first.entries().iter().skip(before) {
        t.note(format!("#{} {}", entry.seq, entry.message));
    }
    t.note(format!("initialised singletons: {}", p.singletons().tags().join(", ")));
    Ok(())
}

fn adapter(p: &Provisioner, t: &mut Transcript) -> Result<(), ProvisionError> {
    let storage = p.storage();
    let local_before = storage.local_writes().len();
    let cloud_before = storage.cloud_uploads().len();
    let stored = storage.save_file("reports/q3.pdf", b"%PDF-1.7");
    t.note(format!("save_file via {}: {} ({} bytes)", storage.route(), stored.location, stored.size));

    let local_after = storage.local_writes().len();
    let cloud_after = storage.cloud_uploads().len();
    match storage.route() {
        StorageRoute::Local => t.check(
            local_after == local_before + 1 && cloud_after == cloud_before,
            "local route wrote only to disk",
        ),
        StorageRoute::Cloud => t.check(
            cloud_after == cloud_before + 1 && local_after == local_before,
            "cloud route uploaded only to object storage",
        ),
    }

    let notifier = p.notifier();
    let delivery = notifier.send("This is a notification message");
    t.note(format!("send via {}: {}", notifier.label(), delivery.message));
    let expected = match notifier.route() {
        NotificationRoute::Slack => "slack",
        NotificationRoute::Teams => "teams",
    };
    t.check(delivery.channel == expected, "notification took the configured route");

    let aux = notifier.send_slack("direct slack post");
    t.note(format!("auxiliary: {} <- {}", aux.channel, aux.message));
    Ok(())
}
