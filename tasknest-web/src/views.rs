/// Template rendering
///
/// Thin view collaborator over minijinja. Templates are embedded at compile
/// time so the binary is self-contained; they are deliberately plain HTML,
/// since presentation is not this crate's concern.
use axum::response::Html;
use minijinja::{Environment, Value};

/// Compiled template environment, shared via `AppState`
pub struct Views {
    env: Environment<'static>,
}

impl Default for Views {
    fn default() -> Self {
        Self::new()
    }
}

impl Views {
    /// Builds the environment with every template registered
    ///
    /// # Panics
    ///
    /// Panics if an embedded template fails to parse; that is a build defect,
    /// not a runtime condition, and it surfaces on the first call at startup.
    pub fn new() -> Self {
        let mut env = Environment::new();

        let templates: &[(&str, &str)] = &[
            ("base.html", include_str!("../templates/base.html")),
            ("index.html", include_str!("../templates/index.html")),
            ("archive.html", include_str!("../templates/archive.html")),
            ("add.html", include_str!("../templates/add.html")),
            ("edit.html", include_str!("../templates/edit.html")),
            ("register.html", include_str!("../templates/register.html")),
            ("success.html", include_str!("../templates/success.html")),
            ("login.html", include_str!("../templates/login.html")),
            ("about.html", include_str!("../templates/about.html")),
            ("user_data.html", include_str!("../templates/user_data.html")),
            (
                "edit_password.html",
                include_str!("../templates/edit_password.html"),
            ),
            (
                "edit_email.html",
                include_str!("../templates/edit_email.html"),
            ),
        ];

        for (name, source) in templates {
            env.add_template(name, source)
                .unwrap_or_else(|e| panic!("embedded template {} is invalid: {}", name, e));
        }

        Self { env }
    }

    /// Renders a template with the given context
    ///
    /// # Errors
    ///
    /// Returns an error if the template is missing or rendering fails
    pub fn render(&self, name: &str, ctx: Value) -> Result<Html<String>, minijinja::Error> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_parse() {
        // Construction panics on a malformed template.
        let _ = Views::new();
    }

    #[test]
    fn test_render_index_with_tasks() {
        let views = Views::new();
        let html = views
            .render(
                "index.html",
                context! {
                    tasks => vec![context! {
                        id => "6d1a3c5e-0000-0000-0000-000000000000",
                        title => "Buy milk",
                        description => "2%",
                        priority => 3,
                        created_on => "2024-05-17",
                    }],
                },
            )
            .expect("index should render");

        assert!(html.0.contains("Buy milk"));
        assert!(html.0.contains("2%"));
    }

    #[test]
    fn test_render_index_empty() {
        let views = Views::new();
        let html = views
            .render("index.html", context! { tasks => Vec::<Value>::new() })
            .expect("index should render without tasks");
        assert!(html.0.contains("No tasks"));
    }

    #[test]
    fn test_render_login_with_error() {
        let views = Views::new();
        let html = views
            .render(
                "login.html",
                context! { error => "Incorrect username or password" },
            )
            .expect("login should render");
        assert!(html.0.contains("Incorrect username or password"));
    }

    #[test]
    fn test_render_edit_prefills_fields() {
        let views = Views::new();
        let html = views
            .render(
                "edit.html",
                context! {
                    editable => context! {
                        id => "6d1a3c5e-0000-0000-0000-000000000000",
                        title => "Water plants",
                        description => "balcony only",
                        priority => 1,
                    },
                },
            )
            .expect("edit should render");
        assert!(html.0.contains("Water plants"));
        assert!(html.0.contains("balcony only"));
    }

    #[test]
    fn test_render_unknown_template_fails() {
        let views = Views::new();
        assert!(views.render("nope.html", context! {}).is_err());
    }
}
