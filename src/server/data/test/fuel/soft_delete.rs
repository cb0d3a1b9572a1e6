use super::*;

/// Tests soft delete marks the fuel and clears its image.
///
/// Expected: true once, row kept with is_delete set and no image, false on repeat
#[tokio::test]
async fn marks_deleted_and_clears_image() -> Result<(), DbErr> {
    use sea_orm::EntityTrait;

    let test = TestBuilder::new()
        .with_table(entity::prelude::Fuel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let fuel = factory::fuel::FuelFactory::new(db)
        .card_image("/images/fuel_1_coal.png")
        .build()
        .await?;

    let repo = FuelRepository::new(db);
    assert!(repo.soft_delete(fuel.id).await?);
    assert!(!repo.soft_delete(fuel.id).await?);

    let stored = entity::prelude::Fuel::find_by_id(fuel.id)
        .one(db)
        .await?
        .unwrap();
    assert!(stored.is_delete);
    assert!(stored.card_image.is_none());

    Ok(())
}

/// Tests replacing the image reference.
///
/// Expected: new reference stored; deleted fuels are skipped
#[tokio::test]
async fn sets_card_image_on_active_fuel_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Fuel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let active = factory::create_fuel(db).await?;
    let deleted = factory::fuel::FuelFactory::new(db).deleted(true).build().await?;

    let repo = FuelRepository::new(db);

    let updated = repo
        .set_card_image(active.id, Some("/images/a.png".to_string()))
        .await?
        .unwrap();
    assert_eq!(updated.card_image.as_deref(), Some("/images/a.png"));

    assert!(repo
        .set_card_image(deleted.id, Some("/images/b.png".to_string()))
        .await?
        .is_none());

    Ok(())
}
