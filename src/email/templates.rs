use std::fmt::Write;

use crate::config::MailConfig;
use crate::models::SubmissionRecord;

use super::OutboundEmail;

const SITE_URL: &str = "https://nordmails.net";

/// Human label for a service code from the contact form.
pub fn service_label(code: &str) -> &str {
    match code {
        "klaviyo-setup" => "Klaviyo Setup",
        "email-flows" => "Email Flows",
        "kampanjer" => "Kampanjer & Nyhetsbrev",
        "optimalisering" => "Optimalisering",
        "komplett" => "Komplett løsning",
        "annet" => "Annet",
        other => other,
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

fn escape_multiline(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

fn submitted_at(record: &SubmissionRecord) -> String {
    record
        .submitted_at()
        .format("%d.%m.%Y, %H:%M:%S UTC")
        .to_string()
}

/// Lead notification for the site owner. Replies go straight to the submitter.
pub fn admin_notification(record: &SubmissionRecord, mail: &MailConfig) -> OutboundEmail {
    let name = if record.name.is_empty() { "Ukjent" } else { record.name.as_str() };

    let mut rows = String::new();
    let mut text = format!(
        "Ny henvendelse mottatt\n\nNavn: {}\nE-post: {}\n",
        name, record.email
    );

    let optional = [
        ("Nettside", record.website.as_deref().unwrap_or_default()),
        ("Ønsket tjeneste", record.service.as_str()),
        ("Budsjett", record.budget.as_str()),
    ];
    for (label, value) in optional.into_iter().filter(|(_, v)| !v.is_empty()) {
        let _ = write!(
            rows,
            r#"<div class="field"><div class="label">{label}:</div><div class="value">{}</div></div>"#,
            escape_html(value)
        );
        let _ = writeln!(text, "{label}: {value}");
    }
    if let Some(message) = &record.message {
        let _ = write!(
            rows,
            r#"<div class="field"><div class="label">Melding:</div><div class="value">{}</div></div>"#,
            escape_multiline(message)
        );
        let _ = write!(text, "\nMelding:\n{message}\n");
    }

    let sent = submitted_at(record);
    let _ = write!(text, "\nSendt: {sent}");

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
  body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; }}
  .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
  .header {{ background-color: #0a0e27; color: #4fc3f7; padding: 20px; border-radius: 8px 8px 0 0; }}
  .content {{ background-color: #f9f9f9; padding: 20px; border-radius: 0 0 8px 8px; }}
  .field {{ margin: 15px 0; padding: 10px; background: white; border-left: 3px solid #4fc3f7; }}
  .label {{ font-weight: bold; color: #0a0e27; }}
  .value {{ margin-top: 5px; color: #666; }}
</style>
</head>
<body>
<div class="container">
  <div class="header"><h2>Ny henvendelse fra nettsiden</h2></div>
  <div class="content">
    <div class="field"><div class="label">Navn:</div><div class="value">{name}</div></div>
    <div class="field"><div class="label">E-post:</div><div class="value"><a href="mailto:{email}">{email}</a></div></div>
    {rows}
    <p style="color: #999; font-size: 12px;">Sendt: {sent}</p>
  </div>
</div>
</body>
</html>"#,
        name = escape_html(name),
        email = escape_html(&record.email),
    );

    OutboundEmail {
        from: mail.from.clone(),
        to: mail.admin_email.clone(),
        reply_to: Some(record.email.clone()),
        subject: format!("Ny henvendelse fra {name} - NordMail"),
        html,
        text,
    }
}

/// Confirmation back to the submitter. Replies go to the site owner.
pub fn auto_reply(record: &SubmissionRecord, mail: &MailConfig) -> OutboundEmail {
    let name = if record.name.is_empty() { "Kunde" } else { record.name.as_str() };

    let mut summary_html = String::new();
    let mut summary_text = String::new();
    if !record.service.is_empty() {
        let label = service_label(&record.service);
        let _ = write!(summary_html, "Tjeneste: {}<br>", escape_html(label));
        let _ = writeln!(summary_text, "Tjeneste: {label}");
    }
    if !record.budget.is_empty() {
        let _ = write!(summary_html, "Budsjett: {}<br>", escape_html(&record.budget));
        let _ = writeln!(summary_text, "Budsjett: {}", record.budget);
    }
    if let Some(message) = &record.message {
        let _ = write!(summary_html, "<br>Melding:<br>{}", escape_multiline(message));
        let _ = write!(summary_text, "\nMelding:\n{message}\n");
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
  body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; }}
  .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
  .header {{ background-color: #0a0e27; color: #4fc3f7; padding: 30px; text-align: center; border-radius: 8px 8px 0 0; }}
  .content {{ background-color: #f9f9f9; padding: 30px; border-radius: 0 0 8px 8px; }}
  .summary {{ background: white; padding: 15px; margin: 20px 0; border-left: 3px solid #4fc3f7; }}
  .button {{ display: inline-block; background-color: #4fc3f7; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; margin-top: 20px; }}
  .footer {{ margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; color: #666; text-align: center; }}
</style>
</head>
<body>
<div class="container">
  <div class="header"><h1>NordMail</h1></div>
  <div class="content">
    <h2>Hei {name}!</h2>
    <p>Takk for at du tok kontakt med NordMail. Vi har mottatt din henvendelse og setter stor pris på at du er interessert i våre tjenester.</p>
    <div class="summary"><strong>Din forespørsel:</strong><br>{summary_html}</div>
    <p>Vi vil gjennomgå din henvendelse og ta kontakt med deg innen 24 timer med et uforpliktende tilbud basert på dine behov.</p>
    <p>Hvis du har spørsmål i mellomtiden, ikke nøl med å svare på denne e-posten.</p>
    <p>Med vennlig hilsen,<br><strong>Teamet på NordMail</strong></p>
    <a href="{SITE_URL}" class="button">Besøk vår nettside</a>
  </div>
  <div class="footer">
    <p>NordMail - Email marketing for norske bedrifter</p>
    <p>Denne e-posten ble sendt til {email}</p>
  </div>
</div>
</body>
</html>"#,
        name = escape_html(name),
        email = escape_html(&record.email),
    );

    let text = format!(
        "Hei {name}!

Takk for at du tok kontakt med NordMail. Vi har mottatt din henvendelse og setter stor pris på at du er interessert i våre tjenester.

Din forespørsel:
{summary_text}
Vi vil gjennomgå din henvendelse og ta kontakt med deg innen 24 timer med et uforpliktende tilbud basert på dine behov.

I mellomtiden kan du utforske våre tjenester på {SITE_URL}/services.html eller se våre pakker på {SITE_URL}/pricing.html

Hvis du har spørsmål i mellomtiden, ikke nøl med å svare på denne e-posten.

Med vennlig hilsen,
Teamet på NordMail

---
NordMail - Email marketing for norske bedrifter
Denne e-posten ble sendt til {email}",
        email = record.email,
    );

    OutboundEmail {
        from: mail.from.clone(),
        to: record.email.clone(),
        reply_to: Some(mail.admin_email.clone()),
        subject: "Takk for din henvendelse - NordMail".to_string(),
        html,
        text,
    }
}
