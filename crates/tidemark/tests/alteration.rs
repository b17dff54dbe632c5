mod support;

use pretty_assertions::assert_eq;
use support::FakeMySql;
use tidemark::{Field, KeySpec, ModelDescriptor, ModelRef};

fn user() -> ModelRef {
    ModelDescriptor::builder("user")
        .field("id", Field::id())
        .field("name", Field::varchar(64))
        .build()
}

#[tokio::test]
async fn changes_apply_immediately() {
    let server = FakeMySql::new();
    let user = user();
    let db = server.db(&[&user]).await;
    db.make_table(&user).await.unwrap();
    server.clear_log();

    let alter = db.alter(&user);

    alter.add_column("email", Field::varchar(255).required()).await.unwrap();
    assert_eq!(
        server.column("user", "email").as_deref(),
        Some("VARCHAR(255) NOT NULL")
    );

    alter.change_column("name", Field::varchar(128)).await.unwrap();
    assert_eq!(server.column("user", "name").as_deref(), Some("VARCHAR(128)"));

    alter.rename_column("email", "mail").await.unwrap();
    alter.add_key("mail", KeySpec::unique().length(32)).await.unwrap();
    alter.execute_sql("OPTIMIZE TABLE user").await.unwrap();
    alter.engine("MyISAM").await.unwrap();
    alter.drop_column("name").await.unwrap();

    assert_eq!(server.columns("user"), ["id", "mail"]);
    assert_eq!(
        server.log(),
        [
            "ALTER TABLE `user` ADD `email` VARCHAR(255) NOT NULL",
            "ALTER TABLE `user` CHANGE `name` `name` VARCHAR(128)",
            "SHOW CREATE TABLE `user`",
            "ALTER TABLE `user` CHANGE COLUMN `email` `mail` VARCHAR(255) NOT NULL",
            "ALTER TABLE `user` ADD UNIQUE KEY `mail` (`mail`(32))",
            "OPTIMIZE TABLE user",
            "ALTER TABLE `user` ENGINE = MyISAM",
            "ALTER TABLE `user` DROP COLUMN `name`",
        ]
    );

    // Ad hoc changes never touch the ledger
    assert_eq!(server.ledger("user").as_deref(), Some("0000"));
}

#[tokio::test]
async fn errors_surface_per_call() {
    let server = FakeMySql::new();
    let user = user();
    let db = server.db(&[&user]).await;
    db.make_table(&user).await.unwrap();

    let alter = db.alter(&user);

    let err = alter.rename_column("nope", "other").await.unwrap_err();
    assert!(err.is_column_not_found());
    assert_eq!(err.to_string(), "column `nope` not found in table `user`");

    let err = alter.drop_column("nope").await.unwrap_err();
    assert!(err.is_driver());

    let err = alter.add_column("bio", Field::text().unique(tidemark::Unique::Key)).await.unwrap_err();
    assert!(err.is_invalid_unique_constraint());
}
