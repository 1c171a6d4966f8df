#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use ua_datasets::remote::{Transport, TransportError};
use ua_datasets::DownloadOptions;

/// In-memory transport: serves fixed bodies by URL and records every request.
///
/// URLs without a body answer with HTTP 404.
#[derive(Default)]
pub struct FakeTransport {
    bodies: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str, _timeout: Duration) -> Result<Vec<u8>, TransportError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or(TransportError::Status(404))
    }
}

/// Download options that never sleep or print.
pub fn quiet_download(download: bool, force_download: bool) -> DownloadOptions {
    DownloadOptions {
        download,
        force_download,
        max_retries: 2,
        backoff_factor: 0.0,
        show_progress: false,
        ..DownloadOptions::default()
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write fixture file");
}

pub const NESTED_SQUAD: &str = r#"{
  "version": "v2.0",
  "data": [
    {
      "title": "Київ",
      "paragraphs": [
        {
          "context": "Київ є столицею України. Місто стоїть на Дніпрі.",
          "qas": [
            {
              "id": "kyiv-1",
              "question": "Що є столицею України?",
              "answers": [{"text": "Київ", "answer_start": 0}]
            },
            {
              "id": "kyiv-2",
              "question": "На якій річці стоїть місто?",
              "answers": [{"text": "Дніпрі", "answer_start": 3}]
            },
            {
              "id": "kyiv-3",
              "question": "Скільки мешканців?",
              "answers": [],
              "is_impossible": true
            }
          ]
        }
      ]
    }
  ]
}"#;

pub const FLAT_SQUAD: &str = r#"{"data": [
  {"question": "Q1", "context": "C1", "answer": "A1"},
  {"question": "Хто написав Кобзар?", "context": "Кобзар написав Тарас Шевченко.", "answer": "Тарас Шевченко"},
  {"question": "Q3", "context": "C3", "answer": ""},
  {"question": "Q4", "context": "C4"}
]}"#;

pub const NEWS_CSV: &str = "title,text,tags,target\n\
Перемога,Збірна виграла матч,футбол|збірна,спорт\n\
Бюджет,Уряд ухвалив бюджет,,політика\n\
,,,\n\
Курс,Гривня зміцнилась,фінанси,економіка\n\
Турнір,Фінал турніру,теніс,спорт";

pub const POS_CONLLU: &str = "# sent_id = 1\n\
# text = Я люблю Київ.\n\
1\tЯ\tя\tPRON\t_\t_\n\
2\tлюблю\tлюбити\tVERB\t_\t_\n\
3\tКиїв\tКиїв\tPROPN\t_\t_\n\
4\t.\t.\tPUNCT\t_\t_\n\
\n\
# sent_id = 2\n\
1-2\tДоньці\t_\t_\t_\t_\n\
1\tДонь\tдонька\tNOUN\t_\t_\n\
2\tці\tце\tPRON\t_\t_\n\
3\tпривіт\n\
4\t!\t!\tPUNCT\t_\t_";
