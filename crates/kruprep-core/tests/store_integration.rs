//! End-to-end question bank flows over both repository implementations.

use kruprep_core::{
    CategoryFilter, FileRepository, ImportError, MemoryRepository, QuestionDraft, QuestionStore,
};

fn memory_store() -> QuestionStore {
    QuestionStore::new(Box::new(MemoryRepository::new()))
}

fn file_store(root: &std::path::Path) -> QuestionStore {
    QuestionStore::new(Box::new(FileRepository::with_root(root)))
}

fn make_draft(text: &str, category: &str) -> QuestionDraft {
    QuestionDraft {
        category: category.to_string(),
        question: text.to_string(),
        choices: vec!["ตัวเลือกแรก".to_string(), "ตัวเลือกที่สอง".to_string()],
        answer: "ตัวเลือกแรก".to_string(),
        explanation: "คำอธิบายประกอบ".to_string(),
    }
}

#[test]
fn fresh_store_seeds_exactly_once() {
    let mut store = memory_store();
    assert_eq!(store.list_all().unwrap().len(), 3);
    assert_eq!(store.list_all().unwrap().len(), 3);
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn bank_survives_reopening_the_file_repository() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = file_store(dir.path());
        store
            .create(make_draft("คำถามที่เพิ่มเอง", "ความเป็นครู"))
            .unwrap();
        assert_eq!(store.count().unwrap(), 4);
    }
    let mut reopened = file_store(dir.path());
    assert_eq!(reopened.count().unwrap(), 4);
}

#[test]
fn emptied_bank_stays_empty_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = file_store(dir.path());
        for q in store.list_all().unwrap() {
            assert!(store.delete(&q.id).unwrap());
        }
        assert_eq!(store.count().unwrap(), 0);
    }
    let mut reopened = file_store(dir.path());
    assert_eq!(reopened.count().unwrap(), 0);
}

#[test]
fn admin_flow_validates_then_creates() {
    let mut store = memory_store();
    let draft = QuestionDraft {
        category: " จรรยาบรรณครู ".to_string(),
        question: "  ครูควรทำสิ่งใดเป็นอันดับแรก?  ".to_string(),
        choices: vec![
            " ยึดประโยชน์ของศิษย์ ".to_string(),
            "ยึดประโยชน์ส่วนตน".to_string(),
            "   ".to_string(),
        ],
        answer: "ยึดประโยชน์ของศิษย์".to_string(),
        explanation: " ตามจรรยาบรรณวิชาชีพ ".to_string(),
    };
    let trimmed = draft.trimmed();
    trimmed.validate().unwrap();
    let created = store.create(trimmed).unwrap();
    assert_eq!(created.question, "ครูควรทำสิ่งใดเป็นอันดับแรก?");
    assert_eq!(created.choices.len(), 2);
    assert_eq!(
        store
            .list_by_category(&CategoryFilter::Only("จรรยาบรรณครู".to_string()))
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn export_import_moves_questions_between_banks() {
    let mut source = memory_store();
    let created = source
        .create(make_draft("คำถามที่มีเฉพาะในคลังต้นทาง", "ความเป็นครู"))
        .unwrap();
    let payload = source.export_all().unwrap();

    // The target bank shares the three starter questions, so only the extra
    // one lands, under the id it carried in the export.
    let mut target = memory_store();
    let outcome = target.import_batch(&payload).unwrap();
    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.skipped, 3);
    assert_eq!(target.count().unwrap(), 4);
    let moved = target
        .list_all()
        .unwrap()
        .into_iter()
        .find(|q| q.question == "คำถามที่มีเฉพาะในคลังต้นทาง")
        .unwrap();
    assert_eq!(moved.id, created.id);
}

#[test]
fn import_adds_m_minus_n_for_n_duplicates() {
    let mut store = memory_store();
    let seeded = store.list_all().unwrap();
    let payload = serde_json::json!([
        {
            "question": seeded[0].question,
            "choices": seeded[0].choices,
            "answer": seeded[0].answer,
            "category": seeded[0].category,
            "explanation": seeded[0].explanation
        },
        {
            "question": seeded[1].question,
            "choices": seeded[1].choices,
            "answer": seeded[1].answer,
            "category": seeded[1].category,
            "explanation": seeded[1].explanation
        },
        {
            "question": "คำถามใหม่ข้อที่หนึ่ง",
            "choices": ["ก", "ข"],
            "answer": "ก",
            "category": "จิตวิทยาสำหรับครู",
            "explanation": "คำอธิบาย"
        },
        {
            "question": "คำถามใหม่ข้อที่สอง",
            "choices": ["ก", "ข"],
            "answer": "ข",
            "category": "จิตวิทยาสำหรับครู",
            "explanation": "คำอธิบาย"
        }
    ]);
    let outcome = store.import_batch(&payload.to_string()).unwrap();
    assert_eq!(outcome.added, 2);
    assert_eq!(outcome.skipped, 2);
    assert_eq!(store.count().unwrap(), 5);
}

#[test]
fn reimporting_own_export_is_a_no_op() {
    let mut store = memory_store();
    store
        .create(make_draft("คำถามก่อนส่งออก", "ความเป็นครู"))
        .unwrap();
    let before = store.count().unwrap();
    let payload = store.export_all().unwrap();
    let outcome = store.import_batch(&payload).unwrap();
    assert_eq!(outcome.added, 0);
    assert_eq!(outcome.skipped, before);
    assert_eq!(store.count().unwrap(), before);
}

#[test]
fn structural_failure_aborts_without_touching_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = file_store(dir.path());
    let before = store.export_all().unwrap();

    let payload = serde_json::json!([
        {
            "question": "ข้อมูลดีหนึ่งข้อ",
            "choices": ["ก", "ข"],
            "answer": "ก",
            "category": "ความเป็นครู",
            "explanation": "คำอธิบายประกอบ"
        },
        { "question": "ขาดทุกอย่าง" }
    ]);
    let err = store.import_batch(&payload.to_string()).unwrap_err();
    assert!(matches!(err, ImportError::InvalidRecord { index: 1, .. }));
    assert_eq!(store.export_all().unwrap(), before);
}

#[test]
fn update_and_delete_round_trip_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = file_store(dir.path());
    let created = store
        .create(make_draft("คำถามที่จะถูกแก้ไข", "ความเป็นครู"))
        .unwrap();

    let patch = kruprep_core::QuestionPatch {
        answer: Some("ตัวเลือกที่สอง".to_string()),
        ..Default::default()
    };
    let updated = store.update(&created.id, patch).unwrap().unwrap();
    assert_eq!(updated.answer, "ตัวเลือกที่สอง");

    let mut reopened = file_store(dir.path());
    let persisted = reopened
        .list_all()
        .unwrap()
        .into_iter()
        .find(|q| q.id == created.id)
        .unwrap();
    assert_eq!(persisted.answer, "ตัวเลือกที่สอง");

    assert!(reopened.delete(&created.id).unwrap());
    assert!(!reopened.delete(&created.id).unwrap());
}
