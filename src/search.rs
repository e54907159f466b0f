use crate::app::AppState;
use crate::members::Member;

/// Case-insensitive substring match against name, email and role.
pub fn matches(member: &Member, query: &str) -> bool {
    matches_lowercase(member, &query.to_lowercase())
}

fn matches_lowercase(member: &Member, query: &str) -> bool {
    query.is_empty()
        || member.name.to_lowercase().contains(query)
        || member.email.to_lowercase().contains(query)
        || member.role.to_lowercase().contains(query)
}

pub fn filter_members(all: &[Member], query: &str) -> Vec<Member> {
    let q = query.to_lowercase();
    if q.is_empty() {
        return all.to_vec();
    }
    all.iter().filter(|m| matches_lowercase(m, &q)).cloned().collect()
}

/// Re-filter after the search term changed; the view jumps back to page 1.
pub fn apply_search(app: &mut AppState) {
    app.members = filter_members(&app.members_all, &app.search_query);
    app.current_page = 1;
    app.cursor = 0;
    app.finish_edit_if_hidden();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_member(id: u64, name: &str, email: &str, role: &str) -> Member {
        Member {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    fn sample() -> Vec<Member> {
        vec![
            mk_member(1, "Aaron Miles", "aaron@mailinator.com", "member"),
            mk_member(2, "Aishwarya Naik", "aishwarya@mailinator.com", "member"),
            mk_member(3, "Arvind Kumar", "arvind@mailinator.com", "admin"),
        ]
    }

    #[test]
    fn search_matches_name_email_or_role() {
        let all = sample();
        assert_eq!(filter_members(&all, "aRvInD").len(), 1);
        assert_eq!(filter_members(&all, "AISHWARYA@").len(), 1);
        let admins = filter_members(&all, "admin");
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].id, 3);
    }

    #[test]
    fn matches_ignores_query_case() {
        let all = sample();
        assert!(matches(&all[2], "ADMIN"));
        assert!(matches(&all[0], "Aaron M"));
        assert!(!matches(&all[0], "ARVIND"));
        assert!(matches(&all[1], ""));
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let all = sample();
        let ids: Vec<u64> = filter_members(&all, "").iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn id_is_not_searched() {
        let all = sample();
        assert!(filter_members(&all, "3").is_empty());
    }

    #[test]
    fn apply_search_resets_page_and_cursor() {
        let all: Vec<Member> = (1..=25)
            .map(|i| mk_member(i, &format!("user{i}"), &format!("u{i}@x.io"), "member"))
            .collect();
        let mut app = AppState::new(all);
        app.current_page = 3;
        app.cursor = 4;
        app.search_query = "user1".to_string();
        apply_search(&mut app);
        // user1, user10..user19
        assert_eq!(app.members.len(), 11);
        assert_eq!(app.current_page, 1);
        assert_eq!(app.cursor, 0);
    }
}
