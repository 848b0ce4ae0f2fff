//! Check command implementation.

use crate::cli::CheckArgs;
use crate::commands::load_context;
use crate::error::Result;
use otelsink_output::PluginContext;

/// Execute the check command.
pub fn execute_check(args: CheckArgs) -> Result<()> {
    let ctx = load_context(&args.config)?;
    print!("{}", summarize(&ctx));
    Ok(())
}

/// Human-readable summary of a ready context.
pub fn summarize(ctx: &PluginContext) -> String {
    let mut out = String::new();

    if let Some(upstream) = ctx.upstream() {
        let target = upstream.target();
        out.push_str(&format!(
            "target:      {} ({})\n",
            target.addr(),
            target.io.describe()
        ));
    }
    if let Some(proxy) = ctx.proxy() {
        out.push_str(&format!("proxy:       {}\n", proxy.url));
    }
    if let Some(endpoints) = ctx.endpoints() {
        out.push_str(&format!("logs_uri:    {}\n", endpoints.logs));
        out.push_str(&format!("traces_uri:  {}\n", endpoints.traces));
        out.push_str(&format!("metrics_uri: {}\n", endpoints.metrics));
    }

    out.push_str("body keys:\n");
    for entry in ctx.body_key_entries() {
        out.push_str(&format!("  - {}\n", entry.pattern()));
    }

    if let Some(labels) = ctx.labels().filter(|labels| !labels.is_empty()) {
        out.push_str("labels:\n");
        for label in labels.iter() {
            out.push_str(&format!("  {} = {}\n", label.key, label.value));
        }
    }

    out.push_str(&format!("compression: {}\n", ctx.compression().as_str()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use otelsink_output::OutputConfig;

    #[test]
    fn test_summary_lists_defaults() {
        let ctx = PluginContext::create(OutputConfig::default()).unwrap();
        let summary = summarize(&ctx);

        assert!(summary.contains("target:      127.0.0.1:80 (tcp)"));
        assert!(summary.contains("logs_uri:    /v1/logs"));
        assert!(summary.contains("  - $log\n  - $message\n"));
        assert!(summary.contains("compression: none"));
        assert!(!summary.contains("labels:"));
        assert!(!summary.contains("proxy:"));
    }

    #[test]
    fn test_summary_lists_labels() {
        let mut config = OutputConfig::default();
        config.add_label = vec!["env prod".to_string()];
        let ctx = PluginContext::create(config).unwrap();

        assert!(summarize(&ctx).contains("labels:\n  env = prod\n"));
    }

    #[test]
    fn test_summary_lists_proxy_target() {
        let mut config = OutputConfig::default();
        config.proxy = Some("https://proxy.local".to_string());
        let ctx = PluginContext::create(config).unwrap();
        let summary = summarize(&ctx);

        assert!(summary.contains("target:      proxy.local:443 (tcp)\n"));
        assert!(summary.contains("proxy:       https://proxy.local\n"));
        assert!(summary.ends_with("compression: none\n"));
    }
}
