//! # Record Subcommands
//!
//! Listing, search, creation, editing and deletion of register records.
//! All of them require a session.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use areg_core::{Record, RecordField, RecordId, Route, SortOrder};
use areg_models::{
    BulkDeleteOutcome, DeleteOutcome, FormError, RecordFormModel, RecordListModel,
};

use crate::prompt::TerminalConfirm;
use crate::Context;

/// Record subcommands.
#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    /// List records, optionally filtered and sorted by date.
    List {
        /// Match against full names, identity number, or code.
        #[arg(long, default_value = "")]
        search: String,
        /// `asc` (oldest first) or `desc` (newest first).
        #[arg(long, default_value = "asc")]
        sort: SortOrder,
    },

    /// Show one record.
    Show { id: String },

    /// Create a record. The register code is issued by the server.
    New(RecordFieldArgs),

    /// Edit a record. Only the given fields change.
    Edit {
        id: String,
        #[command(flatten)]
        fields: RecordFieldArgs,
    },

    /// Delete one record.
    Delete {
        id: String,
        /// Do not ask for confirmation.
        #[arg(long)]
        yes: bool,
    },

    /// Delete every record.
    DeleteAll {
        #[arg(long)]
        yes: bool,
    },
}

/// Editable record fields.
#[derive(Args, Debug, Default, Clone)]
pub struct RecordFieldArgs {
    #[arg(long)]
    pub full_names: Option<String>,
    #[arg(long)]
    pub identity_number: Option<String>,
    /// "ID Document", "Driver's License", "Passport", or "Other Official Document".
    #[arg(long)]
    pub verification_method: Option<String>,
    /// Document name when the method is "Other Official Document".
    #[arg(long)]
    pub other_verification: Option<String>,
    /// Repeat for several numbers. Replaces entries in order; extras are appended.
    #[arg(long = "phone")]
    pub phones: Vec<String>,
    #[arg(long)]
    pub vehicle_registration: Option<String>,
    #[arg(long)]
    pub contact_address: Option<String>,
    #[arg(long)]
    pub goods_description: Option<String>,
    #[arg(long = "notes")]
    pub additional_notes: Option<String>,
}

impl RecordFieldArgs {
    /// Copy every given field into `form`.
    pub fn apply(&self, form: &mut RecordFormModel) -> Result<(), FormError> {
        let scalars = [
            (RecordField::FullNames, &self.full_names),
            (RecordField::IdentityNumber, &self.identity_number),
            (RecordField::VerificationMethod, &self.verification_method),
            (RecordField::OtherVerification, &self.other_verification),
            (RecordField::VehicleRegistration, &self.vehicle_registration),
            (RecordField::ContactAddress, &self.contact_address),
            (RecordField::GoodsDescription, &self.goods_description),
            (RecordField::AdditionalNotes, &self.additional_notes),
        ];
        for (field, value) in scalars {
            if let Some(value) = value {
                form.set(field, value)?;
            }
        }
        for (index, phone) in self.phones.iter().enumerate() {
            if index >= form.draft().telephone_numbers.len() {
                form.add_phone();
            }
            form.set_phone(index, phone)?;
        }
        Ok(())
    }
}

/// Execute a record subcommand.
pub async fn run_records(command: &RecordCommand, ctx: &Context) -> Result<u8> {
    match command {
        RecordCommand::List { search, sort } => {
            ctx.require(Route::Dashboard)?;
            let mut model = RecordListModel::new(ctx.client.clone());
            model.load().await.context("failed to load records")?;
            model.set_search_term(search.as_str());
            model.set_sort_order(*sort);
            let view = model.view();
            for record in &view {
                println!("{}", summary_line(record));
            }
            println!("{} of {} records", view.len(), model.len());
            Ok(0)
        }

        RecordCommand::Show { id } => {
            let id = RecordId::new(id.as_str());
            ctx.require(Route::RecordDetail { id: id.clone() })?;
            let record = ctx
                .client
                .records()
                .get(&id)
                .await
                .with_context(|| format!("failed to load record {id}"))?;
            print_record(&record);
            Ok(0)
        }

        RecordCommand::New(fields) => {
            ctx.require(Route::NewRecord)?;
            let mut form = RecordFormModel::for_create(ctx.client.clone())
                .await
                .context("failed to obtain a register code")?;
            fields.apply(&mut form)?;
            let saved = form.submit().await?;
            println!(
                "OK: created record {} ({})",
                saved.record.code, saved.route
            );
            Ok(0)
        }

        RecordCommand::Edit { id, fields } => {
            let id = RecordId::new(id.as_str());
            ctx.require(Route::EditRecord { id: id.clone() })?;
            let mut form = RecordFormModel::for_edit(ctx.client.clone(), id.clone())
                .await
                .with_context(|| format!("failed to load record {id}"))?;
            fields.apply(&mut form)?;
            let saved = form.submit().await?;
            println!("OK: updated record {}", saved.record.code);
            Ok(0)
        }

        RecordCommand::Delete { id, yes } => {
            let id = RecordId::new(id.as_str());
            ctx.require(Route::Dashboard)?;
            let mut model = RecordListModel::new(ctx.client.clone());
            let confirm = TerminalConfirm { assume_yes: *yes };
            match model.delete_one(&id, &confirm).await? {
                DeleteOutcome::Deleted => println!("OK: deleted record {id}"),
                DeleteOutcome::Cancelled => println!("Cancelled."),
            }
            Ok(0)
        }

        RecordCommand::DeleteAll { yes } => {
            ctx.require(Route::Dashboard)?;
            let mut model = RecordListModel::new(ctx.client.clone());
            model.load().await.context("failed to load records")?;
            let confirm = TerminalConfirm { assume_yes: *yes };
            match model
                .delete_all(&confirm)
                .await
                .context("bulk delete failed; no records were removed locally, run `areg list` to check")?
            {
                BulkDeleteOutcome::NothingToDelete => println!("No records to delete."),
                BulkDeleteOutcome::Cancelled => println!("Cancelled."),
                BulkDeleteOutcome::Deleted { count } => println!("OK: deleted {count} records"),
            }
            Ok(0)
        }
    }
}

fn summary_line(record: &Record) -> String {
    format!(
        "{:<10} {}  {:<30} {:<15} {}",
        record.code,
        record.created_at.format("%Y-%m-%d"),
        record.full_names,
        record.identity_number,
        record.telephone_numbers.join(", ")
    )
}

fn print_record(record: &Record) {
    let method = record
        .verification_method
        .map(|m| m.to_string())
        .unwrap_or_default();
    println!("Code:          {}", record.code);
    println!("Id:            {}", record.id);
    println!("Created:       {}", record.created_at.format("%Y-%m-%d %H:%M"));
    println!("Full names:    {}", record.full_names);
    println!("Identity no.:  {}", record.identity_number);
    println!("Verification:  {method}");
    if record
        .verification_method
        .is_some_and(|m| m.requires_other_verification())
    {
        println!("Document:      {}", record.other_verification);
    }
    println!("Telephone:     {}", record.telephone_numbers.join(", "));
    println!("Vehicle reg.:  {}", record.vehicle_registration);
    println!("Address:       {}", record.contact_address);
    println!("Goods:         {}", record.goods_description);
    println!("Notes:         {}", record.additional_notes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use areg_client::{ApiClient, ClientConfig};
    use areg_session::{MemorySessionStore, NoopNavigator};
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(subcommand)]
        command: RecordCommand,
    }

    fn offline_form() -> RecordFormModel {
        let client = ApiClient::new(
            ClientConfig::local_mock(1).unwrap(),
            Arc::new(MemorySessionStore::new()),
            Arc::new(NoopNavigator),
        )
        .unwrap();
        RecordFormModel::new_create(client)
    }

    #[test]
    fn list_defaults_to_oldest_first() {
        let cli = Harness::try_parse_from(["areg", "list"]).unwrap();
        match cli.command {
            RecordCommand::List { search, sort } => {
                assert_eq!(search, "");
                assert_eq!(sort, SortOrder::Ascending);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn list_rejects_unknown_sort() {
        assert!(Harness::try_parse_from(["areg", "list", "--sort", "sideways"]).is_err());
    }

    #[test]
    fn repeated_phones_fill_in_order() {
        let cli = Harness::try_parse_from([
            "areg", "new", "--full-names", "Sipho Dlamini", "--phone", "012", "--phone", "013",
        ])
        .unwrap();
        let RecordCommand::New(fields) = cli.command else {
            panic!("expected new");
        };
        let mut form = offline_form();
        fields.apply(&mut form).unwrap();
        assert_eq!(form.draft().full_names, "Sipho Dlamini");
        assert_eq!(form.draft().telephone_numbers, vec!["012", "013"]);
    }

    #[test]
    fn unknown_verification_method_is_refused() {
        let fields = RecordFieldArgs {
            verification_method: Some("Library card".into()),
            ..Default::default()
        };
        assert!(fields.apply(&mut offline_form()).is_err());
    }
}
