//! Staff directory helpers

use crate::types::{StaffAssignment, StaffMember, UNASSIGNED};

/// Staff split by status. Members with any other status appear in neither list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffDirectory<'a> {
    pub active: Vec<&'a StaffMember>,
    pub inactive: Vec<&'a StaffMember>,
}

impl<'a> StaffDirectory<'a> {
    pub fn partition(staff: &'a [StaffMember]) -> Self {
        let mut directory = Self::default();
        for member in staff {
            if member.is_active() {
                directory.active.push(member);
            } else if member.is_inactive() {
                directory.inactive.push(member);
            }
        }
        directory
    }
}

/// Staff fields for a service given a selected staff id.
///
/// `0` or an id with no matching member means unassigned.
pub fn assign_staff(staff_id: u64, staff: &[StaffMember]) -> StaffAssignment {
    match staff.iter().find(|m| staff_id != 0 && m.id == staff_id) {
        Some(member) => StaffAssignment {
            staff_member_id: Some(member.id),
            staff_member_name: member.name.clone(),
        },
        None => StaffAssignment {
            staff_member_id: None,
            staff_member_name: UNASSIGNED.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_member(id: u64, name: &str, status: &str) -> StaffMember {
        StaffMember {
            id,
            name: name.to_string(),
            email: String::new(),
            phone: String::new(),
            specialties: Vec::new(),
            status: status.to_string(),
            rating: 5.0,
            completed_services: 0,
        }
    }

    #[test]
    fn test_partition_by_status() {
        let staff = vec![
            make_member(1, "Emily", "active"),
            make_member(2, "James", "inactive"),
            make_member(3, "Sofia", "active"),
            make_member(4, "Lee", "on-leave"),
        ];

        let directory = StaffDirectory::partition(&staff);

        let active: Vec<_> = directory.active.iter().map(|m| m.id).collect();
        let inactive: Vec<_> = directory.inactive.iter().map(|m| m.id).collect();
        assert_eq!(active, vec![1, 3]);
        assert_eq!(inactive, vec![2]);
    }

    #[test]
    fn test_assign_known_member() {
        let staff = vec![make_member(4, "Emily Davis", "active")];
        let assignment = assign_staff(4, &staff);
        assert_eq!(assignment.staff_member_id, Some(4));
        assert_eq!(assignment.staff_member_name, "Emily Davis");
    }

    #[test]
    fn test_assign_zero_is_unassigned() {
        let staff = vec![make_member(0, "Odd Zero", "active")];
        let assignment = assign_staff(0, &staff);
        assert_eq!(assignment.staff_member_id, None);
        assert_eq!(assignment.staff_member_name, UNASSIGNED);
    }

    #[test]
    fn test_assign_unknown_is_unassigned() {
        let assignment = assign_staff(42, &[]);
        assert_eq!(assignment.staff_member_id, None);
        assert_eq!(assignment.staff_member_name, "Unassigned");
    }
}
