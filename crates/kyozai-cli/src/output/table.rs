use kyozai_core::aggregate::{BucketKind, GradeSection, SubjectBucket, TabReport};
use kyozai_core::model::ProductClassification;

pub fn print_report(report: &TabReport) {
    println!("=== 【{}】{} ===", report.school_name, report.tab);
    match report.revenue_potential {
        Some(potential) => println!(
            "  売上増見込 +{}円 / 年間実績 {}冊",
            potential, report.annual_total_quantity
        ),
        None => println!("  年間実績 {}冊", report.annual_total_quantity),
    }
    println!("  大口基準: 同日{}冊以上", report.bulk_threshold);

    if report.needs_attention {
        println!("  {}教材の注文実績なし: 要確認", report.tab);
        return;
    }

    for grade in &report.grades {
        print_grade(grade);
    }
}

fn print_grade(grade: &GradeSection) {
    println!("--- {} ---", grade.grade);
    if grade.needs_attention {
        println!("  要確認 (注文実績なし)");
        return;
    }
    for bucket in &grade.buckets {
        print_bucket(bucket);
    }
}

fn print_bucket(bucket: &SubjectBucket) {
    if bucket.needs_attention {
        println!("  {}: 要確認", bucket.kind);
        return;
    }

    let low_marker = if bucket.entries.iter().any(|e| e.is_low_emphasis) {
        " [低調]"
    } else {
        ""
    };
    println!("  [{}] 計{}冊{}", bucket.kind, bucket.total_quantity, low_marker);

    for entry in &bucket.entries {
        let composite_marker = if bucket.kind == BucketKind::Composite {
            " (合本)"
        } else {
            ""
        };
        let bulk_marker = if entry.is_bulk { " [大口]" } else { "" };
        println!(
            "    {}{} {}冊 (最多日 {} {}冊{})",
            entry.product_name,
            composite_marker,
            entry.total_quantity,
            entry.peak_day_date.format("%m/%d"),
            entry.peak_day_quantity,
            bulk_marker
        );
    }
}

pub fn print_classification(name: &str, c: &ProductClassification) {
    let grade = c
        .grade
        .map(|g| g.to_string())
        .unwrap_or_else(|| "-".to_string());
    let season = c
        .season
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}  学年:{} 科目:{} 季節:{} 入試:{} 合本:{} -> {}",
        name,
        grade,
        c.subject,
        season,
        if c.is_exam { "有" } else { "無" },
        if c.is_composite { "有" } else { "無" },
        c.category
    );
}
