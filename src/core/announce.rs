//! Release announcement via webhook.

use std::env;

use reqwest::blocking::Client;
use serde_json::json;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::utils::template::{self, TemplateVars};
use crate::utils::validation;

const USER_AGENT: &str = concat!("shipmate/", env!("CARGO_PKG_VERSION"));
const DEFAULT_MESSAGE: &str = "{{projectName}} {{projectVersion}} has been released!";

pub fn post(context: &Context) -> Result<()> {
    let model = context.model();
    let Some(webhook) = &model.announce.webhook else {
        context.logger().info("no announcer is configured, skipping");
        return Ok(());
    };

    let message = template::render(
        webhook.message.as_deref().unwrap_or(DEFAULT_MESSAGE),
        &[
            (TemplateVars::PROJECT_NAME, model.project.name.as_str()),
            (TemplateVars::PROJECT_VERSION, model.project.version.as_str()),
        ],
    );

    if context.dry_run() {
        context
            .logger()
            .info(format!("dry-run: would announce '{}'", message));
        return Ok(());
    }

    let url = validation::require(
        env::var(&webhook.url_env).ok(),
        format!("Environment variable {} is not set", webhook.url_env),
    )?;
    let url = validation::require_non_empty(
        &url,
        format!("Environment variable {} is blank", webhook.url_env),
    )?;

    let response = Client::new()
        .post(url)
        .header("User-Agent", USER_AGENT)
        .json(&json!({ "text": message }))
        .send()
        .map_err(|e| Error::http_request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::http_status(
            status.as_u16(),
            response.text().unwrap_or_default(),
        ));
    }

    context.logger().info("announced release");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use crate::model::{Model, Project, Webhook};

    fn model(webhook: Option<Webhook>) -> Model {
        let mut model = Model {
            project: Project {
                name: "app".to_string(),
                version: "2.0.0".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        model.announce.webhook = webhook;
        model
    }

    fn context(model: Model, dry_run: bool) -> Context {
        Context::new(model, "/tmp", "/tmp/out/shipmate", dry_run, Logger::capture()).unwrap()
    }

    #[test]
    fn skips_when_no_webhook_configured() {
        let ctx = context(model(None), false);
        post(&ctx).unwrap();

        assert!(ctx
            .logger()
            .captured()
            .iter()
            .any(|line| line.contains("no announcer is configured, skipping")));
    }

    #[test]
    fn dry_run_renders_default_message() {
        let ctx = context(model(Some(Webhook::default())), true);
        post(&ctx).unwrap();

        assert!(ctx
            .logger()
            .captured()
            .iter()
            .any(|line| line.contains("dry-run: would announce 'app 2.0.0 has been released!'")));
    }

    #[test]
    fn custom_message_template_is_used() {
        let webhook = Webhook {
            message: Some("shipped {{projectVersion}}".to_string()),
            ..Default::default()
        };
        let ctx = context(model(Some(webhook)), true);
        post(&ctx).unwrap();

        assert!(ctx
            .logger()
            .captured()
            .iter()
            .any(|line| line.contains("shipped 2.0.0")));
    }

    #[test]
    fn missing_url_env_fails_outside_dry_run() {
        let webhook = Webhook {
            url_env: "SHIPMATE_TEST_WEBHOOK_THAT_IS_NEVER_SET".to_string(),
            message: None,
        };
        let ctx = context(model(Some(webhook)), false);

        let err = post(&ctx).unwrap_err();
        assert!(err.message.contains("SHIPMATE_TEST_WEBHOOK_THAT_IS_NEVER_SET"));
    }
}
