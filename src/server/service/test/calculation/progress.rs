use super::*;

/// Tests progress of a request the buyer deleted.
///
/// Expected: Err(NotFound), matching the request detail
#[tokio::test]
async fn deleted_request_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let fuel = factory::create_fuel(db).await?;
    let combustion = CombustionService::new(db);
    let draft = combustion.add_fuel_to_draft(user.id, fuel.id, 1.0).await?;
    combustion.delete(draft.request.id, user.id).await?;
    let (_, dispatcher) = dispatcher();
    let settings = settings(None);

    let result = CalculationService::new(db, &dispatcher, &settings)
        .progress(draft.request.id)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = combustion.get_detail(draft.request.id, user.id, false).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests progress of a request that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_request_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, dispatcher) = dispatcher();
    let settings = settings(None);

    let result = CalculationService::new(db, &dispatcher, &settings)
        .progress(404)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests progress of a submitted request before any result arrives.
///
/// Expected: zero of two calculated
#[tokio::test]
async fn counts_links_before_results() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, request, _) =
        factory::helpers::create_submitted_request_with_fuels(db, &[(1.0, 1.0), (2.0, 1.0)])
            .await?;
    let (_, dispatcher) = dispatcher();
    let settings = settings(None);

    let progress = CalculationService::new(db, &dispatcher, &settings)
        .progress(request.id)
        .await?;

    assert_eq!(progress.request.status, RequestStatus::Submitted);
    assert_eq!(progress.calculated_count, 0);
    assert_eq!(progress.total_count, 2);

    Ok(())
}
