//! `salontrack staff|services|appointments` subcommands

use clap::{Args, Subcommand};
use serde_json::Value;

use crate::format::format_currency;
use crate::services::{assign_staff, RecordStore, StaffDirectory};
use crate::types::{
    coerce_price, split_specialties, AppointmentDraft, Collection, SalonError, ServiceDraft,
    StaffDraft, StaffStatus,
};

fn parse_price(raw: &str) -> Result<f64, String> {
    coerce_price(&Value::from(raw))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_rejected(collection: Collection, rejected: usize) {
    if rejected > 0 {
        eprintln!(
            "note: {} {} record(s) could not be read and were skipped",
            rejected,
            collection.key()
        );
    }
}

// ========== staff ==========

#[derive(Subcommand, Debug)]
pub enum StaffCommand {
    /// List active and inactive staff
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a staff member
    Add(StaffAddArgs),
}

#[derive(Args, Debug)]
pub struct StaffAddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// Comma-separated, e.g. "Color, Balayage"
    #[arg(long, default_value = "")]
    pub specialties: String,

    #[arg(long, value_enum, default_value_t = StaffStatus::Active)]
    pub status: StaffStatus,
}

impl StaffCommand {
    pub fn run(self, store: &RecordStore) -> anyhow::Result<()> {
        match self {
            Self::List { json } => {
                let listing = store.staff();
                report_rejected(Collection::Staff, listing.rejected);
                if json {
                    return print_json(&listing.records);
                }

                let directory = StaffDirectory::partition(&listing.records);
                for (label, members) in [("Active", &directory.active), ("Inactive", &directory.inactive)] {
                    println!("{} ({})", label, members.len());
                    for member in members {
                        println!(
                            "  #{:<4} {:<24} {:<32} {}",
                            member.id,
                            member.name,
                            member.specialties.join(", "),
                            member.email
                        );
                    }
                }
                Ok(())
            }
            Self::Add(args) => {
                let draft = StaffDraft {
                    name: args.name,
                    email: args.email,
                    phone: args.phone,
                    specialties: split_specialties(&args.specialties),
                    status: args.status,
                };
                let record = store.create(Collection::Staff, draft.into_value())?;
                print_json(&record)
            }
        }
    }
}

// ========== services ==========

#[derive(Subcommand, Debug)]
pub enum ServicesCommand {
    /// List the service catalog
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a service
    Add {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: ServiceFields,
    },
    /// Edit a service; only the given fields change
    Edit {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: ServiceFields,
    },
    /// Delete a service
    Delete { id: u64 },
}

#[derive(Args, Debug, Default)]
pub struct ServiceFields {
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_parser = parse_price)]
    pub price: Option<f64>,

    /// Free text, e.g. "45 min"
    #[arg(long)]
    pub duration: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Assigned staff member id; 0 or unknown means unassigned
    #[arg(long)]
    pub staff_id: Option<u64>,
}

impl ServiceFields {
    pub fn into_draft(self, name: Option<String>, store: &RecordStore) -> ServiceDraft {
        let staff = self.staff_id.map(|id| {
            let listing = store.staff();
            let assignment = assign_staff(id, &listing.records);
            if id != 0 && assignment.staff_member_id.is_none() {
                tracing::warn!(staff_id = id, "unknown staff member, service left unassigned");
            }
            assignment
        });

        ServiceDraft {
            name,
            description: self.description,
            duration: self.duration,
            price: self.price,
            category: self.category,
            staff,
        }
    }
}

impl ServicesCommand {
    pub fn run(self, store: &RecordStore) -> anyhow::Result<()> {
        match self {
            Self::List { json } => {
                let listing = store.services();
                report_rejected(Collection::Services, listing.rejected);
                if json {
                    return print_json(&listing.records);
                }
                for service in &listing.records {
                    println!(
                        "  #{:<4} {:<28} {:<16} {:>10}  {}",
                        service.id,
                        service.name,
                        service.category_label(),
                        service
                            .price
                            .map(format_currency)
                            .unwrap_or_else(|| "-".to_string()),
                        service.staff_label()
                    );
                }
                Ok(())
            }
            Self::Add { name, fields } => {
                let draft = fields.into_draft(Some(name), store);
                let record = store.create(Collection::Services, draft.into_patch())?;
                print_json(&record)
            }
            Self::Edit { id, name, fields } => {
                let draft = fields.into_draft(name, store);
                if draft.is_empty() {
                    return Err(SalonError::InvalidRecord(
                        "nothing to change; pass at least one field".into(),
                    )
                    .into());
                }
                let record = store.update(Collection::Services, id, draft.into_patch())?;
                print_json(&record)
            }
            Self::Delete { id } => {
                store.delete(Collection::Services, id)?;
                println!("Deleted service {}", id);
                Ok(())
            }
        }
    }
}

// ========== appointments ==========

#[derive(Subcommand, Debug)]
pub enum AppointmentsCommand {
    /// List appointments
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record an appointment
    Add(AppointmentAddArgs),
}

#[derive(Args, Debug)]
pub struct AppointmentAddArgs {
    /// Service name, matched to the catalog case-insensitively
    #[arg(long)]
    pub service: String,

    /// YYYY-MM-DD
    #[arg(long)]
    pub date: chrono::NaiveDate,

    #[arg(long, value_parser = parse_price)]
    pub price: f64,

    #[arg(long)]
    pub client: Option<String>,

    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub stylist: Option<String>,

    #[arg(long)]
    pub status: Option<String>,
}

impl AppointmentsCommand {
    pub fn run(self, store: &RecordStore) -> anyhow::Result<()> {
        match self {
            Self::List { json } => {
                let listing = store.appointments();
                report_rejected(Collection::Appointments, listing.rejected);
                if json {
                    return print_json(&listing.records);
                }
                for apt in &listing.records {
                    println!(
                        "  #{:<4} {}  {:<28} {:>10}  {}",
                        apt.id,
                        apt.date,
                        apt.service,
                        format_currency(apt.price),
                        apt.client_name.as_deref().unwrap_or("")
                    );
                }
                Ok(())
            }
            Self::Add(args) => {
                let draft = AppointmentDraft {
                    service: args.service,
                    date: args.date.format("%Y-%m-%d").to_string(),
                    price: args.price,
                    client_name: args.client,
                    time: args.time,
                    stylist: args.stylist,
                    status: args.status,
                };
                let record = store.create(Collection::Appointments, draft.into_value())?;
                print_json(&record)
            }
        }
    }
}
