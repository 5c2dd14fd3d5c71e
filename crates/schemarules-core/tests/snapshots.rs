use insta::assert_json_snapshot;
use schemarules_core::classifier::mysql;
use schemarules_core::{build_table_rules, ColumnDescriptor, RulesConfig};

#[test]
fn test_users_table_rules() {
    let columns = vec![
        ColumnDescriptor::new("id", "bigint unsigned").with_auto_increment(true),
        ColumnDescriptor::new("name", "varchar(255)").with_max_length(255),
        ColumnDescriptor::new("email", "varchar(191)").with_max_length(191),
        ColumnDescriptor::new("age", "tinyint unsigned").with_nullable(true),
        ColumnDescriptor::new("role", "enum('admin','editor','viewer')"),
        ColumnDescriptor::new("team_id", "bigint unsigned")
            .with_nullable(true)
            .with_foreign_key("teams", "id"),
        ColumnDescriptor::new("remember_token", "varchar(100)").with_nullable(true),
        ColumnDescriptor::new("created_at", "timestamp").with_nullable(true),
    ];
    let config = RulesConfig::default().with_skip_columns(["remember_token"]);

    let rules = build_table_rules(&columns, &[], mysql::classify, &config);

    assert_json_snapshot!(rules, @r#"
    {
      "name": [
        "required",
        "string",
        "min:1",
        "max:255"
      ],
      "email": [
        "required",
        "string",
        "min:1",
        "max:191"
      ],
      "age": [
        "nullable",
        "integer",
        "min:0",
        "max:255"
      ],
      "role": [
        "required",
        "string",
        "in:admin,editor,viewer"
      ],
      "team_id": [
        "nullable",
        "exists:teams,id"
      ]
    }
    "#);
}
