use std::io::{BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use invite::{InviteInfo, InviteRequest, Provider};
use permissions::{Bitmask, Catalog, Flag};
use serde::Serialize;

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let report = build_report(&opts)?;

    let mut stdout = BufWriter::new(std::io::stdout().lock());
    if opts.json {
        serde_json::to_writer_pretty(&mut stdout, &report).context("Failed to encode report")?;
        writeln!(&mut stdout)?;
    } else {
        report.write_text(&mut stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

/// CLI to compute bot invite permission bitmasks from flag ids (or to
/// break an existing value back down into flags)
#[derive(Debug, Parser)]
struct Opts {
    /// Permission flag ids to select, e.g. `send_messages view_channel`
    flags: Vec<String>,

    /// Decimal permission value to start from
    #[arg(short, long)]
    value: Option<Bitmask>,

    /// Application client id. When given, an invite link is printed.
    #[arg(short, long)]
    client_id: Option<String>,

    /// OAuth2 scopes, comma separated. Defaults to `bot`.
    #[arg(short, long)]
    scope: Option<String>,

    /// Request the authorization code grant
    #[arg(long)]
    code: bool,

    /// Invite link flavour: `discord` for the authorize link, `embed` for
    /// the embed preview link
    #[arg(short, long, default_value = "discord")]
    provider: Provider,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    value: Bitmask,
    explanation: String,
    flags: Vec<Flag>,
    unknown_bits: Bitmask,
    invite: Option<String>,
}

impl Report {
    fn write_text(&self, w: &mut impl Write) -> std::io::Result<()> {
        writeln!(w, "value: {}", self.value)?;
        writeln!(w, "explanation: {}", self.explanation)?;
        let ids = self.flags.iter().map(|flag| flag.id).collect::<Vec<_>>();
        writeln!(w, "flags: {}", ids.join(", "))?;
        if self.unknown_bits != 0 {
            writeln!(w, "unknown bits: {:#x}", self.unknown_bits)?;
        }
        if let Some(invite) = &self.invite {
            writeln!(w, "invite: {}", invite)?;
        }
        Ok(())
    }
}

fn build_report(opts: &Opts) -> anyhow::Result<Report> {
    let mut catalog = Catalog::new();
    let start = opts.value.unwrap_or_default();
    catalog.select_bits(start);
    for id in &opts.flags {
        catalog.set(id, true)?;
    }

    let value = catalog.bitmask();
    let invite = opts
        .client_id
        .as_ref()
        .map(|id| -> anyhow::Result<String> {
            let info = InviteInfo {
                id: Some(id.clone()),
                scope: opts.scope.clone(),
                has_scope: opts.scope.is_some(),
                has_code: opts.code,
            };
            InviteRequest::new(opts.provider, &info, value)
                .context("Client id must not be empty")?
                .url()
                .with_context(|| format!("Failed to build invite for client {}", id))
        })
        .transpose()?;

    Ok(Report {
        value,
        explanation: catalog.explain(),
        flags: catalog.selected().cloned().collect(),
        unknown_bits: catalog.unknown_bits(start),
        invite,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> anyhow::Result<Report> {
        let opts = Opts::try_parse_from(std::iter::once("mask").chain(args.iter().copied()))?;
        build_report(&opts)
    }

    fn ids(report: &Report) -> Vec<&'static str> {
        report.flags.iter().map(|flag| flag.id).collect()
    }

    #[test]
    fn encodes_flag_ids() {
        let report = run(&["administrator", "view_channel"]).unwrap();
        assert_eq!(report.value, 0x408);
        assert_eq!(report.explanation, "0x8 | 0x400");
        assert_eq!(ids(&report), vec!["administrator", "view_channel"]);
        assert_eq!(report.invite, None);
    }

    #[test]
    fn decodes_value_and_reports_stray_bits() {
        let report = run(&["--value", &((1u64 << 62) | 0x400000000000).to_string()]).unwrap();
        assert_eq!(ids(&report), vec!["send_voice_messages"]);
        assert_eq!(report.value, 0x400000000000);
        assert_eq!(report.unknown_bits, 1 << 62);
    }

    #[test]
    fn prints_invite_links() {
        let report = run(&["-v", "8", "-c", "123", "--code"]).unwrap();
        assert_eq!(
            report.invite.as_deref(),
            Some("https://discord.com/oauth2/authorize/?permissions=8&scope=bot&client_id=123&response_type=code")
        );

        let report = run(&["-v", "8", "-c", "123", "-s", "bot,identify", "-p", "embed"]).unwrap();
        assert_eq!(report.invite.as_deref(), Some("https://discord.now.sh/123?p8&s9"));
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(run(&["manage_everything"]).is_err());
        let err = run(&["-c", "123", "-s", "bot,nope", "-p", "embed"]).unwrap_err();
        assert_eq!(err.to_string(), "Failed to build invite for client 123");
        assert_eq!(err.root_cause().to_string(), "Unknown scope: nope");
        assert!(run(&["-c", "", "-v", "8"]).is_err());
        assert!(run(&["-c", "123", "-p", "slack"]).is_err());
    }

    #[test]
    fn text_report() {
        let report = run(&["-v", "6"]).unwrap();
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "value: 6\nexplanation: 0x2 | 0x4\nflags: kick_members, ban_members\n"
        );
    }

    #[test]
    fn json_report_carries_flag_details() {
        let report = run(&["-v", "9", "-c", "123", "-p", "embed", "--code"]).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["value"], 9);
        assert_eq!(json["explanation"], "0x8 | 0x1");
        assert_eq!(json["unknown_bits"], 0);
        assert_eq!(json["invite"], "https://discord.now.sh/123?p9&t1");

        let flags = json["flags"].as_array().unwrap();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0]["id"], "administrator");
        assert_eq!(flags[0]["name"], "Administrator");
        assert_eq!(flags[0]["bit"], 8);
        assert_eq!(flags[0]["auto"], false);
        assert_eq!(flags[0]["selected"], true);
        assert_eq!(flags[1]["id"], "create_instant_invite");
        assert_eq!(flags[1]["bit"], 1);
    }

    #[test]
    fn json_report_without_invite() {
        let json = serde_json::to_value(run(&["speak"]).unwrap()).unwrap();
        assert_eq!(json["value"], 0x200000);
        assert!(json["invite"].is_null());
    }
}
