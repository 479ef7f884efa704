//! Accent colors for destinations
//!
//! Presentation-only: a redirect inherits the color of the first configured
//! command whose hostname ends with the redirect's hostname, so subdomain
//! commands color their apex-domain redirects too.

use url::Url;

use relay_query::Command;

pub fn color_for(commands: &[Command], redirect: &str) -> Option<String> {
    let parsed = Url::parse(redirect).ok()?;
    let host = parsed.host_str()?;

    commands
        .iter()
        .find(|command| {
            Url::parse(&command.url)
                .ok()
                .and_then(|url| url.host_str().map(|h| h.ends_with(host)))
                .unwrap_or(false)
        })
        .and_then(|command| command.color.clone())
}
