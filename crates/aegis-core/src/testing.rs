//! Canonical fixtures shared by the unit tests.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

/// The clock every fixture is consistent with.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn company_profile() -> Value {
    json!({
        "id": "4b1c6f0e-8a1d-4c5e-9f2a-1d3e5b7c9a01",
        "created_at": "2025-05-30T09:15:00Z",
        "updated_at": "2025-05-31T17:45:00Z",
        "name": "TechStartup Inc",
        "one_liner": "Revolutionary AI platform for enterprise automation",
        "sector": "Enterprise Software",
        "stage": "series-a",
        "founded_year": 2020,
        "location": "San Francisco, CA",
        "website": "https://techstartup.com",
        "description": "A comprehensive AI platform that helps enterprises automate their workflows.",
        "logo_url": "https://techstartup.com/logo.png",
        "social_links": {
            "linkedin": "https://www.linkedin.com/company/techstartup",
            "twitter": "https://twitter.com/techstartup",
        },
    })
}

pub fn investment_metrics() -> Value {
    json!({
        "id": "9e2d7a44-3b6f-4f1e-8c0d-2a4b6c8d0e12",
        "created_at": "2025-05-30T09:15:00Z",
        "updated_at": "2025-05-30T09:15:00Z",
        "revenue": {
            "arr": 1_000_000.0,
            "mrr": 83_333.0,
            "growth_rate": 150.0,
            "projected_arr": [1_000_000.0, 2_000_000.0, 4_000_000.0],
        },
        "traction": {
            "customers": 50,
            "customer_growth_rate": 20.0,
            "churn_rate": 5.0,
            "nps": 70.0,
        },
        "team": {
            "size": 25,
            "founders_count": 2,
            "key_hires": [
                {
                    "name": "John Doe",
                    "role": "CTO",
                    "background": "Former Google engineer",
                    "years_experience": 10,
                    "is_founder": true,
                }
            ],
        },
        "funding": {
            "total_raised": 5_000_000.0,
            "last_round_size": 3_000_000.0,
            "last_round_date": "2024-11-15T00:00:00Z",
            "current_ask": 10_000_000.0,
            "valuation": 50_000_000.0,
        },
        "extraction_timestamp": "2025-05-30T09:14:12Z",
        "source_documents": ["doc1.pdf", "doc2.docx"],
        "confidence": 0.85,
    })
}

pub fn risk_flag() -> Value {
    json!({
        "id": "c3a5e7f9-1b2d-4e6f-8a0c-3e5f7a9b1c23",
        "created_at": "2025-05-30T09:20:00Z",
        "updated_at": "2025-05-30T09:20:00Z",
        "type": "financial-anomaly",
        "severity": "HIGH",
        "title": "Unusual Churn Pattern",
        "description": "Customer churn rate has increased significantly in recent months without clear explanation.",
        "affected_metrics": ["churn_rate", "customer_growth_rate"],
        "suggested_mitigation": "Conduct customer interviews to understand churn drivers and implement retention strategies.",
        "source_documents": ["transcript.txt", "metrics.pdf"],
        "confidence": 0.9,
        "impact": "high",
        "likelihood": "medium",
        "category": "financial",
        "detected_at": "2025-05-30T09:19:41Z",
        "evidence": ["Churn increased from 3% to 8%", "No explanation in founder updates"],
    })
}

pub fn benchmark_data() -> Value {
    json!({
        "id": "5f8e2c1a-7d4b-4a9e-b3c6-4f6a8b0c2d34",
        "created_at": "2025-05-01T00:00:00Z",
        "updated_at": "2025-05-01T00:00:00Z",
        "sector": "Enterprise Software",
        "sample_size": 100,
        "metrics": {
            "arr": {
                "min": 100_000.0,
                "max": 50_000_000.0,
                "median": 2_000_000.0,
                "p25": 500_000.0,
                "p75": 5_000_000.0,
                "p90": 15_000_000.0,
                "mean": 3_500_000.0,
                "std_dev": 8_000_000.0,
                "sample_size": 100,
            }
        },
        "last_updated": "2025-05-01T00:00:00Z",
        "data_source": "Industry Research Database",
        "methodology": "Survey of 100 enterprise software companies in Series A-C stages",
        "confidence": 0.85,
        "time_range": {
            "start_date": "2024-05-01T00:00:00Z",
            "end_date": "2025-05-01T00:00:00Z",
        },
    })
}

pub fn deal_memo() -> Value {
    json!({
        "id": "7a9c1e3f-5b7d-4f9a-8c2e-5a7b9c1d3e45",
        "created_at": "2025-05-31T10:00:00Z",
        "updated_at": "2025-05-31T10:00:00Z",
        "aegis_deal_memo": {
            "summary": {
                "company_name": "TechStartup Inc",
                "one_liner": "Revolutionary AI platform for enterprise automation",
                "sector": "Enterprise Software",
                "stage": "series-a",
                "signal_score": 85.0,
                "recommendation": "buy",
                "confidence_level": 0.9,
                "last_updated": "2025-05-31T10:00:00Z",
            },
            "key_benchmarks": [
                {
                    "metric": "ARR",
                    "company_value": 1_000_000.0,
                    "sector_median": 2_000_000.0,
                    "percentile": 40.0,
                    "interpretation": "Below median but showing strong growth trajectory",
                    "context": "Company is earlier stage than typical Series A",
                    "recommendation": "Monitor growth rate closely",
                }
            ],
            "growth_potential": {
                "upside_summary": "Strong potential for 10x growth over 5 years driven by market expansion and product development.",
                "growth_timeline": "Expect 3x growth in next 18 months with Series B funding",
                "key_drivers": ["Market expansion", "Product development", "Team scaling"],
                "scalability_factors": ["Cloud-native architecture", "API-first design"],
                "market_expansion_opportunity": "Large addressable market with low penetration",
                "revenue_projection": {
                    "year1": 2_000_000.0,
                    "year3": 10_000_000.0,
                    "year5": 50_000_000.0,
                },
            },
            "risk_assessment": {
                "overall_risk_score": 35.0,
                "high_priority_risks": [],
                "medium_priority_risks": [risk_flag()],
                "low_priority_risks": [],
                "risk_mitigation_plan": [
                    "Regular customer feedback collection",
                    "Competitive monitoring",
                ],
            },
            "investment_recommendation": {
                "narrative": "TechStartup Inc represents a compelling investment opportunity in the rapidly growing enterprise automation market. The company has demonstrated strong product-market fit with impressive early traction and a world-class founding team.",
                "investment_thesis": "Enterprise automation is a massive market opportunity with TechStartup positioned to capture significant market share.",
                "ideal_check_size": "$2-5M",
                "ideal_valuation_cap": "$25M cap",
                "suggested_terms": ["Board seat", "Pro rata rights", "Anti-dilution protection"],
                "key_diligence_questions": [
                    "What is the customer acquisition cost trend?",
                    "How defensible is the technology moat?",
                    "What are the key competitive threats?",
                ],
                "follow_up_actions": ["Reference calls with customers", "Technical deep dive"],
                "timeline_to_decision": "2-3 weeks",
            },
            "analysis_weightings": {
                "market_opportunity": 25.0,
                "team": 25.0,
                "traction": 20.0,
                "product": 15.0,
                "competitive_position": 15.0,
            },
            "metadata": {
                "generated_by": "Aegis AI v1.0",
                "analysis_version": "1.0.0",
                "source_documents": ["pitch_deck.pdf", "transcript.txt"],
                "processing_time": 45.2,
                "data_quality": 0.85,
            },
        },
    })
}
