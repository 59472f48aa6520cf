//! Full case tables against the real services. These need network access and
//! valid keys (defaults or GEOPROBE_* overrides), so they only run with
//! `cargo test -- --ignored`.

use anyhow::Result;

use geoprobe::scenarios::{all_cases, landmark, metro, run_cases, CaseReport};
use geoprobe::{GeoClient, ProbeConfig, ScenarioKind};

fn live_client() -> Result<GeoClient> {
    let _ = dotenvy::dotenv();
    Ok(GeoClient::new(ProbeConfig::from_env())?)
}

fn assert_no_failures(reports: &[CaseReport]) {
    for report in reports {
        println!("{} [{}] {}: {}", report.outcome.symbol(), report.scenario, report.case, report.outcome.detail());
    }
    let failed: Vec<&CaseReport> = reports.iter().filter(|r| r.outcome.is_failed()).collect();
    assert!(failed.is_empty(), "{} case(s) failed: {:#?}", failed.len(), failed);
}

#[tokio::test]
#[ignore = "requires network access to the live services"]
async fn live_credentials() -> Result<()> {
    let client = live_client()?;
    let reports = run_cases(&client, all_cases(ScenarioKind::Credentials), 1).await;
    assert_no_failures(&reports);
    assert!(reports.iter().all(|r| r.outcome.is_passed()));
    Ok(())
}

#[tokio::test]
#[ignore = "requires network access to the live services"]
async fn live_coordinate_consistency() -> Result<()> {
    let client = live_client()?;
    let reports = run_cases(&client, all_cases(ScenarioKind::Consistency), 1).await;
    assert_no_failures(&reports);
    Ok(())
}

#[tokio::test]
#[ignore = "requires network access to the live services"]
async fn live_pharmacies_near_landmarks() -> Result<()> {
    let client = live_client()?;
    let reports = run_cases(&client, all_cases(ScenarioKind::Pharmacies), 1).await;
    assert_no_failures(&reports);

    let outcome = landmark::run(&client, "Санкт-Петербург, Дворец Юсуповых", "pharmacy").await?;
    assert!(outcome.is_passed() || outcome.is_skipped(), "{:?}", outcome);
    Ok(())
}

#[tokio::test]
#[ignore = "requires network access to the live services"]
async fn live_places_near_metro() -> Result<()> {
    let client = live_client()?;
    let reports = run_cases(&client, all_cases(ScenarioKind::MetroPlaces), 1).await;
    assert_no_failures(&reports);

    let outcome = metro::run(&client, "СПб, Мавзолей", "dentist").await?;
    assert!(outcome.is_passed() || outcome.is_skipped(), "{:?}", outcome);
    Ok(())
}
