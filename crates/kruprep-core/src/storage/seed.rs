//! The starter question set installed on first use of the bank.

use crate::question::Question;

/// The three bundled starter questions, installed exactly once (see
/// [`QuestionStore`](crate::storage::QuestionStore)).
pub fn starter_questions() -> Vec<Question> {
    vec![
        Question {
            id: "1".to_string(),
            category: "จรรยาบรรณครู".to_string(),
            question: "ข้อใดกล่าวถูกต้องเกี่ยวกับหลักจรรยาบรรณของวิชาชีพครู?".to_string(),
            choices: vec![
                "ครูสามารถรับของขวัญจากนักเรียนเพื่อแลกเกรดได้".to_string(),
                "ครูควรคำนึงถึงผลประโยชน์ส่วนตัวก่อน".to_string(),
                "ครูต้องยึดมั่นในความซื่อสัตย์และความยุติธรรม".to_string(),
                "ครูไม่จำเป็นต้องเคารพผู้บริหาร".to_string(),
            ],
            answer: "ครูต้องยึดมั่นในความซื่อสัตย์และความยุติธรรม".to_string(),
            explanation: "จรรยาบรรณของวิชาชีพครูเน้นย้ำเรื่องความซื่อสัตย์ ความยุติธรรม และการยึดประโยชน์ของผู้เรียนเป็นสำคัญ"
                .to_string(),
        },
        Question {
            id: "2".to_string(),
            category: "กฎหมายการศึกษา".to_string(),
            question: "พระราชบัญญัติการศึกษาแห่งชาติ พ.ศ. 2542 แก้ไขเพิ่มเติม (ฉบับที่ 2) พ.ศ. 2545 กำหนดให้การจัดการศึกษาต้องเป็นไปเพื่อพัฒนาคนไทยให้เป็นมนุษย์ที่สมบูรณ์ทั้งด้านใดบ้าง?"
                .to_string(),
            choices: vec![
                "ร่างกาย สติปัญญา และอารมณ์".to_string(),
                "ร่างกาย จิตใจ สติปัญญา ความรู้ และคุณธรรม".to_string(),
                "สติปัญญา ความสามารถ และทักษะอาชีพ".to_string(),
                "ความรู้ คุณธรรม และวัฒนธรรม".to_string(),
            ],
            answer: "ร่างกาย จิตใจ สติปัญญา ความรู้ และคุณธรรม".to_string(),
            explanation: "มาตรา 6 ของ พ.ร.บ. การศึกษาแห่งชาติฯ กำหนดให้การจัดการศึกษาต้องเป็นไปเพื่อพัฒนาคนไทยให้เป็นมนุษย์ที่สมบูรณ์ทั้งร่างกาย จิตใจ สติปัญญา ความรู้ และคุณธรรม มีจริยธรรมและวัฒนธรรมในการดำรงชีวิต สามารถอยู่ร่วมกับผู้อื่นได้อย่างมีความสุข"
                .to_string(),
        },
        Question {
            id: "3".to_string(),
            category: "หลักสูตรและการสอน".to_string(),
            question: "การสอนแบบใดที่เน้นให้ผู้เรียนสร้างความรู้ด้วยตนเองผ่านการลงมือปฏิบัติและการแก้ปัญหา?"
                .to_string(),
            choices: vec![
                "การสอนแบบบรรยาย".to_string(),
                "การสอนแบบสาธิต".to_string(),
                "การสอนแบบโครงงาน (Project-Based Learning)".to_string(),
                "การสอนแบบท่องจำ".to_string(),
            ],
            answer: "การสอนแบบโครงงาน (Project-Based Learning)".to_string(),
            explanation: "การสอนแบบโครงงานเป็นแนวทางการจัดการเรียนรู้ที่เน้นผู้เรียนเป็นสำคัญ ให้ผู้เรียนได้เรียนรู้ผ่านการลงมือปฏิบัติจริง (Learning by Doing) และการแก้ปัญหาที่ซับซ้อน ซึ่งส่งเสริมการสร้างองค์ความรู้ด้วยตนเอง"
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::CATEGORIES;

    #[test]
    fn starter_set_has_three_valid_questions() {
        let questions = starter_questions();
        assert_eq!(questions.len(), 3);
        for q in &questions {
            assert!(!q.id.is_empty());
            assert!(q.choices.len() >= 2);
            assert!(q.choices.contains(&q.answer));
            assert!(CATEGORIES.contains(&q.category.as_str()));
        }
    }

    #[test]
    fn starter_ids_are_distinct() {
        let questions = starter_questions();
        assert_ne!(questions[0].id, questions[1].id);
        assert_ne!(questions[1].id, questions[2].id);
    }
}
