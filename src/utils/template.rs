//! String template rendering utilities.

pub struct TemplateVars;

impl TemplateVars {
    pub const PROJECT_NAME: &'static str = "projectName";
    pub const PROJECT_VERSION: &'static str = "projectVersion";
    pub const PROJECT_DESCRIPTION: &'static str = "projectDescription";
    pub const PROJECT_WEBSITE: &'static str = "projectWebsite";
    pub const DISTRIBUTION_NAME: &'static str = "distributionName";
    pub const ARTIFACT_FILE: &'static str = "artifactFile";
    pub const ARTIFACT_URL: &'static str = "artifactUrl";
    pub const CHECKSUM_SHA256: &'static str = "checksumSha256";
    pub const FORMULA_CLASS: &'static str = "formulaClass";
}

pub fn render(template: &str, variables: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

pub fn is_present(template: &str, key: &str) -> bool {
    let placeholder = format!("{{{{{}}}}}", key);
    template.contains(&placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_known_placeholders() {
        let out = render(
            "{{projectName}} {{projectVersion}} released",
            &[
                (TemplateVars::PROJECT_NAME, "app"),
                (TemplateVars::PROJECT_VERSION, "1.2.3"),
            ],
        );
        assert_eq!(out, "app 1.2.3 released");
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        let out = render("{{unknown}}", &[(TemplateVars::PROJECT_NAME, "app")]);
        assert_eq!(out, "{{unknown}}");
    }

    #[test]
    fn is_present_detects_placeholder() {
        assert!(is_present("v{{projectVersion}}", TemplateVars::PROJECT_VERSION));
        assert!(!is_present("v1.0.0", TemplateVars::PROJECT_VERSION));
    }
}
