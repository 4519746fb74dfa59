//! Façade tests over an in-memory executor.

use super::*;
use crate::criteria::{Assignment, Assignments};
use crate::param::Arg;
use crate::{Criteria, args};
use std::sync::Mutex;

#[derive(Clone, Debug, PartialEq)]
struct UserRow {
    id: i64,
    name: String,
    status: String,
    age: i32,
}

#[derive(Debug, PartialEq)]
struct User {
    id: i64,
    name: String,
}

impl Table for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["id", "name"];
}

impl FromRow<UserRow> for User {
    fn from_row(row: &UserRow) -> OrmResult<Self> {
        Ok(Self {
            id: row.id,
            name: row.name.clone(),
        })
    }
}

impl FromRow<UserRow> for (i64, String) {
    fn from_row(row: &UserRow) -> OrmResult<Self> {
        Ok((row.id, row.name.clone()))
    }
}

/// Evaluates the simple `column op ?` predicates the builders emit, joined
/// by `and`, against rows held in memory, and records every scope it sees.
#[derive(Default)]
struct MemoryExecutor {
    rows: Mutex<Vec<UserRow>>,
    calls: Mutex<Vec<(&'static str, Scope)>>,
}

impl MemoryExecutor {
    fn with_users(count: i64) -> Self {
        let rows = (1..=count)
            .map(|id| UserRow {
                id,
                name: format!("user{id}"),
                status: if id % 5 == 0 { "banned" } else { "active" }.to_string(),
                age: 15 + id as i32,
            })
            .collect();
        Self {
            rows: Mutex::new(rows),
            calls: Mutex::default(),
        }
    }

    fn record(&self, op: &'static str, scope: &Scope) {
        self.calls.lock().unwrap().push((op, scope.clone()));
    }

    fn calls(&self) -> Vec<(&'static str, Scope)> {
        self.calls.lock().unwrap().clone()
    }

    fn rows(&self) -> Vec<UserRow> {
        self.rows.lock().unwrap().clone()
    }
}

fn column(row: &UserRow, name: &str) -> String {
    match name {
        "id" => format!("{:?}", row.id),
        "name" => format!("{:?}", row.name),
        "status" => format!("{:?}", row.status),
        "age" => format!("{:?}", row.age),
        other => panic!("unknown column {other}"),
    }
}

fn matches(row: &UserRow, scope: &Scope) -> bool {
    if scope.predicate().is_empty() {
        return true;
    }
    let mut args = scope.args().iter();
    scope.predicate().split(" and ").all(|cond| {
        let cond = cond.trim_start_matches("( ").trim_end_matches(" )");
        let parts: Vec<&str> = cond.split_whitespace().collect();
        let [name, op, "?"] = parts.as_slice() else {
            panic!("unsupported predicate {cond}");
        };
        let actual = column(row, name);
        match (*op, args.next()) {
            ("=", Some(Arg::Scalar(p))) => actual == format!("{p:?}"),
            ("in", Some(Arg::List(items))) => items.iter().any(|p| actual == format!("{p:?}")),
            (">", Some(Arg::Scalar(p))) => {
                actual.parse::<i64>().unwrap() > format!("{p:?}").parse::<i64>().unwrap()
            }
            ("<", Some(Arg::Scalar(p))) => {
                actual.parse::<i64>().unwrap() < format!("{p:?}").parse::<i64>().unwrap()
            }
            (op, arg) => panic!("unsupported operator {op} with {arg:?}"),
        }
    })
}

fn assign(row: &mut UserRow, assignments: &Assignments) {
    for (field, assignment) in assignments {
        let Assignment::Value(value) = assignment else {
            panic!("expression assignments are not evaluated in memory");
        };
        let value = format!("{value:?}");
        match field.as_str() {
            "name" => row.name = value.trim_matches('"').to_string(),
            "status" => row.status = value.trim_matches('"').to_string(),
            "age" => row.age = value.parse().unwrap(),
            other => panic!("unknown column {other}"),
        }
    }
}

impl Executor for MemoryExecutor {
    type Row = UserRow;

    async fn count(&self, scope: &Scope) -> OrmResult<i64> {
        self.record("count", scope);
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|r| matches(r, scope)).count() as i64)
    }

    async fn find(&self, scope: &Scope) -> OrmResult<Vec<UserRow>> {
        self.record("find", scope);
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<UserRow> = rows
            .iter()
            .filter(|r| matches(r, scope))
            .cloned()
            .collect();
        if scope.order_clause() == "id desc" {
            found.reverse();
        }
        let offset = scope.row_offset().unwrap_or(0) as usize;
        let limit = scope.row_limit().map_or(usize::MAX, |l| l as usize);
        Ok(found.into_iter().skip(offset).take(limit).collect())
    }

    async fn delete(&self, scope: &Scope) -> OrmResult<u64> {
        self.record("delete", scope);
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !matches(r, scope));
        Ok((before - rows.len()) as u64)
    }

    async fn update(&self, scope: &Scope, assignments: &Assignments) -> OrmResult<u64> {
        self.record("update", scope);
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for row in rows.iter_mut().filter(|r| matches(r, scope)) {
            assign(row, assignments);
            affected += 1;
        }
        Ok(affected)
    }
}

struct FailingExecutor;

impl Executor for FailingExecutor {
    type Row = UserRow;

    async fn count(&self, _scope: &Scope) -> OrmResult<i64> {
        Err(OrmError::Other("connection reset".to_string()))
    }

    async fn find(&self, _scope: &Scope) -> OrmResult<Vec<UserRow>> {
        Err(OrmError::Other("connection reset".to_string()))
    }

    async fn delete(&self, _scope: &Scope) -> OrmResult<u64> {
        Err(OrmError::Other("connection reset".to_string()))
    }

    async fn update(&self, _scope: &Scope, _assignments: &Assignments) -> OrmResult<u64> {
        Err(OrmError::Other("connection reset".to_string()))
    }
}

#[tokio::test]
async fn find_by_id_found_and_missing() {
    let exec = MemoryExecutor::with_users(3);

    let user: Option<User> = find_by_id(&exec, 2i64).await.unwrap();
    assert_eq!(
        user,
        Some(User {
            id: 2,
            name: "user2".to_string()
        })
    );

    let missing: Option<User> = find_by_id(&exec, 99i64).await.unwrap();
    assert!(missing.is_none());

    let calls = exec.calls();
    let (op, scope) = &calls[0];
    assert_eq!(*op, "find");
    assert_eq!(scope.table(), "users");
    assert_eq!(scope.columns(), ["id", "name"]);
    assert_eq!(scope.predicate(), "id = ?");
    assert_eq!(scope.row_limit(), Some(1));
}

#[tokio::test]
async fn find_by_ids_skips_executor_when_empty() {
    let exec = MemoryExecutor::with_users(3);
    let users: Vec<User> = find_by_ids(&exec, Vec::<i64>::new()).await.unwrap();
    assert!(users.is_empty());
    assert!(exec.calls().is_empty());
}

#[tokio::test]
async fn find_by_ids_uses_in_list() {
    let exec = MemoryExecutor::with_users(5);
    let users: Vec<User> = find_by_ids(&exec, [1i64, 3, 42]).await.unwrap();
    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), [1, 3]);

    let calls = exec.calls();
    let (_, scope) = &calls[0];
    assert_eq!(scope.predicate(), "id in ?");
    assert_eq!(format!("{:?}", scope.args()), "[[1, 3, 42]]");
}

#[tokio::test]
async fn find_one_without_cause_matches_everything() {
    let exec = MemoryExecutor::with_users(3);
    let user: Option<User> = find_one(&exec, None).await.unwrap();
    assert_eq!(user.map(|u| u.id), Some(1));

    let calls = exec.calls();
    let (_, scope) = &calls[0];
    assert_eq!(scope.predicate(), "");
    assert_eq!(scope.row_limit(), Some(1));
}

#[tokio::test]
async fn find_one_ignores_ordering() {
    let exec = MemoryExecutor::with_users(3);
    let cause = criteria::gt("age", 16i32).desc(["id"]);
    let user: Option<User> = find_one(&exec, Some(cause)).await.unwrap();
    assert_eq!(user.map(|u| u.id), Some(2));
    assert_eq!(exec.calls()[0].1.order_clause(), "");
}

#[tokio::test]
async fn find_all_applies_predicate_and_order() {
    let exec = MemoryExecutor::with_users(10);
    let cause = criteria::eq("status", "active")
        .lt("age", 22i32)
        .desc(["id"]);
    let users: Vec<User> = find_all(&exec, Some(cause)).await.unwrap();
    assert_eq!(
        users.iter().map(|u| u.id).collect::<Vec<_>>(),
        [6, 4, 3, 2, 1]
    );

    let calls = exec.calls();
    let (op, scope) = &calls[0];
    assert_eq!(*op, "find");
    assert_eq!(scope.predicate(), "status = ? and age < ?");
    assert_eq!(scope.order_clause(), "id desc");
    assert_eq!(scope.row_limit(), None);
}

#[tokio::test]
async fn page_counts_then_loads_bounded_rows() {
    // 25 users, every fifth one banned: 20 active.
    let exec = MemoryExecutor::with_users(25);
    let cause = criteria::eq("status", "active").desc(["id"]);

    let page: Page<User> = page(&exec, 1, 10, Some(cause)).await.unwrap();
    assert_eq!(page.total, 20);
    assert_eq!(page.rows.len(), 10);
    assert_eq!(page.rows[0].id, 12);

    let calls = exec.calls();
    assert_eq!(calls.len(), 2);

    let (op, count_scope) = &calls[0];
    assert_eq!(*op, "count");
    assert_eq!(count_scope.predicate(), "status = ?");
    assert_eq!(count_scope.order_clause(), "");
    assert_eq!(count_scope.row_limit(), None);
    assert_eq!(count_scope.row_offset(), None);

    let (op, find_scope) = &calls[1];
    assert_eq!(*op, "find");
    assert_eq!(find_scope.predicate(), "status = ?");
    assert_eq!(find_scope.order_clause(), "id desc");
    assert_eq!(find_scope.row_offset(), Some(10));
    assert_eq!(find_scope.row_limit(), Some(10));
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let exec = MemoryExecutor::with_users(5);
    let page: Page<User> = page(&exec, 3, 10, None).await.unwrap();
    assert_eq!(page.total, 5);
    assert!(page.rows.is_empty());
}

#[tokio::test]
async fn page_rejects_invalid_bounds() {
    let exec = MemoryExecutor::with_users(5);

    let err = page::<User, _>(&exec, 0, 0, None).await.unwrap_err();
    assert!(err.is_validation());

    let err = page::<User, _>(&exec, u64::MAX, 2, None).await.unwrap_err();
    assert!(err.is_validation());

    assert!(exec.calls().is_empty());
}

#[tokio::test]
async fn delete_without_cause_removes_every_row() {
    let exec = MemoryExecutor::with_users(4);
    let affected = delete::<User, _>(&exec, None).await.unwrap();
    assert_eq!(affected, 4);
    assert!(exec.rows().is_empty());

    let calls = exec.calls();
    let (op, scope) = &calls[0];
    assert_eq!(*op, "delete");
    assert_eq!(scope.table(), "users");
    assert_eq!(scope.predicate(), "");
}

#[tokio::test]
async fn delete_by_id_affects_at_most_one_row() {
    let exec = MemoryExecutor::with_users(6);
    let affected = delete::<User, _>(&exec, Some(criteria::eq("id", 5i64)))
        .await
        .unwrap();
    assert_eq!(affected, 1);
    assert_eq!(exec.rows().len(), 5);

    let affected = delete::<User, _>(&exec, Some(criteria::eq("id", 5i64)))
        .await
        .unwrap();
    assert_eq!(affected, 0);
}

#[tokio::test]
async fn update_none_or_noop_skips_executor() {
    let exec = MemoryExecutor::with_users(2);
    assert_eq!(update::<User, _>(&exec, None).await.unwrap(), 0);

    let noop = Update::new([criteria::eq("id", 1i64)]);
    assert_eq!(update::<User, _>(&exec, Some(noop)).await.unwrap(), 0);

    assert!(exec.calls().is_empty());
}

#[tokio::test]
async fn update_applies_assignments_to_matching_rows() {
    let exec = MemoryExecutor::with_users(5);
    let change = criteria::set("status", "archived")
        .set("age", 40i32)
        .in_list("id", [2i64, 4]);

    let affected = update::<User, _>(&exec, Some(change)).await.unwrap();
    assert_eq!(affected, 2);

    let rows = exec.rows();
    assert_eq!(rows[1].status, "archived");
    assert_eq!(rows[1].age, 40);
    assert_eq!(rows[3].status, "archived");
    assert_eq!(rows[0].status, "active");

    let calls = exec.calls();
    let (op, scope) = &calls[0];
    assert_eq!(*op, "update");
    assert_eq!(scope.predicate(), "id in ?");
}

#[tokio::test]
async fn update_with_initial_causes() {
    let exec = MemoryExecutor::with_users(5);
    let change = Update::new([criteria::eq("status", "banned")]).set("name", "hidden");
    let affected = update::<User, _>(&exec, Some(change)).await.unwrap();
    assert_eq!(affected, 1);
    assert_eq!(exec.rows()[4].name, "hidden");
    assert_eq!(exec.calls()[0].1.predicate(), "( status = ? )");
}

#[tokio::test]
async fn get_field_map_selects_id_and_field() {
    let exec = MemoryExecutor::with_users(4);
    let names: HashMap<i64, String> =
        get_field_map::<User, _, _, _>(&exec, "name", Some(criteria::lt("id", 3i64)))
            .await
            .unwrap();
    assert_eq!(names.len(), 2);
    assert_eq!(names[&1], "user1");
    assert_eq!(names[&2], "user2");

    let calls = exec.calls();
    let (_, scope) = &calls[0];
    assert_eq!(scope.columns(), ["id", "name"]);
    assert_eq!(scope.predicate(), "id < ?");
}

#[tokio::test]
async fn get_field_map_without_cause() {
    let exec = MemoryExecutor::with_users(3);
    let names: HashMap<i64, String> = get_field_map::<User, _, _, _>(&exec, "name", None)
        .await
        .unwrap();
    assert_eq!(names.len(), 3);
}

#[tokio::test]
async fn executor_errors_pass_through() {
    let exec = FailingExecutor;

    let err = find_all::<User, _>(&exec, None).await.unwrap_err();
    assert_eq!(err.to_string(), "connection reset");

    let err = page::<User, _>(&exec, 0, 10, None).await.unwrap_err();
    assert_eq!(err.to_string(), "connection reset");

    let err = delete::<User, _>(&exec, None).await.unwrap_err();
    assert!(matches!(err, OrmError::Other(_)));

    let err = update::<User, _>(&exec, Some(criteria::set("name", "x")))
        .await
        .unwrap_err();
    assert!(matches!(err, OrmError::Other(_)));
}

#[tokio::test]
async fn executor_by_reference() {
    let exec = MemoryExecutor::with_users(2);
    let by_ref = &exec;
    let users: Vec<User> = find_all(&by_ref, Some(criteria::in_values("id", args![1i64])))
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(exec.calls()[0].1.predicate(), "id = ?");
}
