use contracts::domain::a001_lead::aggregate::{Lead, LeadListFilter};
use contracts::projections::p900_pipeline_board::{
    default_columns, BoardColumn, BoardColumnDef, LeadCardDto, PipelineBoardDto,
};

use crate::domain::a001_lead;
use crate::shared::error::DomainError;

/// Build the kanban board over the live lead set
///
/// Stateless: re-reads the register and re-partitions on every call; there is
/// no incremental update model.
pub async fn build_board() -> Result<PipelineBoardDto, DomainError> {
    let leads = a001_lead::service::list(&LeadListFilter::default()).await?;
    Ok(partition(&leads, &default_columns()))
}

/// Partition leads into columns, preserving definition order
///
/// A lead lands in the first column whose status group contains its status;
/// a lead matching no column is left off the board.
pub fn partition(leads: &[Lead], defs: &[BoardColumnDef]) -> PipelineBoardDto {
    let mut columns: Vec<BoardColumn> = defs
        .iter()
        .map(|def| BoardColumn {
            key: def.key.clone(),
            title: def.title.clone(),
            count: 0,
            leads: Vec::new(),
        })
        .collect();

    let mut total = 0;
    for lead in leads {
        if let Some(idx) = defs.iter().position(|d| d.statuses.contains(&lead.status)) {
            columns[idx].leads.push(LeadCardDto::from(lead));
            columns[idx].count += 1;
            total += 1;
        }
    }

    PipelineBoardDto { columns, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::{LeadSource, LeadStatus};

    fn lead(phone: &str, status: LeadStatus) -> Lead {
        let mut l = Lead::new_for_insert(
            format!("LD-{}", phone),
            "Board Lead".into(),
            phone.into(),
            format!("{}@x.com", phone),
            LeadSource::WalkIn,
            None,
            50,
            None,
        );
        l.set_status(status, Some("reason".into()));
        l
    }

    #[test]
    fn test_every_lead_lands_in_exactly_one_column() {
        let leads: Vec<Lead> = LeadStatus::all()
            .into_iter()
            .enumerate()
            .map(|(i, s)| lead(&format!("{}", i), s))
            .collect();

        let board = partition(&leads, &default_columns());
        assert_eq!(board.total, leads.len());
        let placed: usize = board.columns.iter().map(|c| c.count).sum();
        assert_eq!(placed, leads.len());
    }

    #[test]
    fn test_grouped_column_collects_both_statuses() {
        let leads = vec![
            lead("1", LeadStatus::TestDrive),
            lead("2", LeadStatus::Negotiation),
            lead("3", LeadStatus::New),
        ];
        let board = partition(&leads, &default_columns());
        let active = board.columns.iter().find(|c| c.key == "active").unwrap();
        assert_eq!(active.count, 2);
    }

    #[test]
    fn test_column_order_follows_definitions() {
        let board = partition(&[], &default_columns());
        let keys: Vec<&str> = board.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["new", "contacted", "active", "won", "lost"]);
    }

    #[test]
    fn test_unmatched_status_is_left_off_the_board() {
        let defs = vec![BoardColumnDef {
            key: "won".into(),
            title: "Won".into(),
            statuses: vec![LeadStatus::Won],
        }];
        let leads = vec![lead("1", LeadStatus::New), lead("2", LeadStatus::Won)];
        let board = partition(&leads, &defs);
        assert_eq!(board.total, 1);
        assert_eq!(board.columns[0].count, 1);
    }
}
