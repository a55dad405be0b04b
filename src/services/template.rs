//! MiniJinja template engine wrapper

use anyhow::Result;
use minijinja::{context, Environment, Value};
use std::path::Path;

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_debug(cfg!(debug_assertions));

        let template_path = "src/web/templates";
        if Path::new(template_path).exists() {
            env.set_loader(minijinja::path_loader(template_path));
        } else {
            tracing::warn!("Template directory not found: {}", template_path);
        }

        Ok(Self { env })
    }

    /// Render a template with context
    pub fn render(&self, template_name: &str, ctx: Value) -> Result<String> {
        let template = self.env.get_template(template_name)?;
        Ok(template.render(ctx)?)
    }

    pub fn render_index(&self) -> Result<String> {
        self.render(
            "index.html",
            context! {
                title => "SSE Chat Relay",
                version => env!("CARGO_PKG_VERSION"),
            },
        )
    }

    pub fn render_chat_page(&self) -> Result<String> {
        self.render("chat.html", context! {})
    }

    pub fn render_ping_page(&self) -> Result<String> {
        self.render("ping.html", context! {})
    }
}
