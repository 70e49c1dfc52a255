//! Plain-text and JSON output for command outcomes.

use childrec_core::{Child, ChildOutcome, ChildStatus};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const HEADER: &str = "ID\tNAME\tSURNAME\tMAIL\tAGE\tCREATED\tUPDATED\tDELETED\tSTATUS";

pub fn print_outcome(outcome: &ChildOutcome, json: bool) -> Result<(), serde_json::Error> {
    if json {
        let text = match outcome {
            ChildOutcome::Record(child) => serde_json::to_string_pretty(child)?,
            ChildOutcome::Records(children) => serde_json::to_string_pretty(children)?,
            ChildOutcome::Absent => "null".to_string(),
        };
        println!("{text}");
        return Ok(());
    }

    match outcome {
        ChildOutcome::Record(child) => {
            println!("{HEADER}");
            println!("{}", format_row(child));
        }
        ChildOutcome::Records(children) => {
            println!("{HEADER}");
            for child in children {
                println!("{}", format_row(child));
            }
        }
        ChildOutcome::Absent => {}
    }
    Ok(())
}

pub fn status_label(status: ChildStatus) -> &'static str {
    match status {
        ChildStatus::Active => "active",
        ChildStatus::Inactive => "inactive",
    }
}

fn format_row(child: &Child) -> String {
    let stamp = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    [
        child.id.to_string(),
        child.name.clone(),
        child.surname.clone(),
        child.mail_address.clone(),
        child.age.to_string(),
        child.created_at.format(TIMESTAMP_FORMAT).to_string(),
        stamp(child.updated_at.map(|at| at.format(TIMESTAMP_FORMAT).to_string())),
        stamp(child.deleted_at.map(|at| at.format(TIMESTAMP_FORMAT).to_string())),
        status_label(child.status()).to_string(),
    ]
    .join("\t")
}
