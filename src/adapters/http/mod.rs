//! reqwest adapter for the prediction backend.
//!
//! Every call is a single blocking `POST` with a JSON body. Callers run it on
//! a worker thread so the terminal keeps redrawing while a request is out.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::domain::{ErrorBody, PredictionRequest, PredictionResponse, SimulationResponse};
use crate::ports::{ApiError, ReadmissionApi};

pub const PREDICT_PATH: &str = "/api/predict";
pub const SIMULATE_PATH: &str = "/api/simulate_staffing";
pub const REPORT_PATH: &str = "/api/report";

/// Backend client bound to one base URL.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for `base_url`.
    ///
    /// `timeout` of `None` lets a request wait indefinitely.
    ///
    /// # Errors
    /// Returns `ApiError::Transport` if the TLS backend cannot be initialized.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, path: &str, payload: &PredictionRequest) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(endpoint = path, fields = payload.len(), "Sending request");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        check_status(path, response)
    }
}

/// Pass 2xx responses through; turn anything else into `ApiError::Server`
/// carrying the body's `error` text when there is one.
fn check_status(path: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());

    tracing::warn!(
        endpoint = path,
        status = status.as_u16(),
        has_message = message.is_some(),
        "Backend rejected request"
    );

    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

impl ReadmissionApi for HttpApi {
    fn predict(&self, payload: &PredictionRequest) -> Result<PredictionResponse, ApiError> {
        self.post(PREDICT_PATH, payload)?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn simulate_staffing(
        &self,
        payload: &PredictionRequest,
    ) -> Result<SimulationResponse, ApiError> {
        self.post(SIMULATE_PATH, payload)?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn report(&self, payload: &PredictionRequest) -> Result<Vec<u8>, ApiError> {
        let bytes = self
            .post(REPORT_PATH, payload)?
            .bytes()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        tracing::debug!(size = bytes.len(), "Report received");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormState;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    /// What the stub server saw.
    struct Captured {
        request_line: String,
        head: String,
        body: String,
    }

    struct Stub {
        base_url: String,
        handle: JoinHandle<Captured>,
    }

    impl Stub {
        fn captured(self) -> Captured {
            self.handle.join().expect("stub thread")
        }
    }

    /// Answer exactly one request with a canned response.
    fn serve_once(status: u16, content_type: &'static str, body: &[u8]) -> Stub {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let body = body.to_vec();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let captured = read_request(&mut stream);
            let head = format!(
                "HTTP/1.1 {status} Stub\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).expect("write head");
            stream.write_all(&body).expect("write body");
            stream.flush().expect("flush");
            captured
        });

        Stub {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    fn read_request(stream: &mut TcpStream) -> Captured {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];

        let header_end = loop {
            if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            let n = stream.read(&mut buf).expect("read head");
            if n == 0 {
                break data.len();
            }
            data.extend_from_slice(&buf[..n]);
        };

        let head = String::from_utf8_lossy(&data[..header_end]).to_string();
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while data.len() < header_end + content_length {
            let n = stream.read(&mut buf).expect("read body");
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
        }

        let end = data.len().min(header_end + content_length);
        Captured {
            request_line: head.lines().next().unwrap_or_default().to_string(),
            head: head.to_ascii_lowercase(),
            body: String::from_utf8_lossy(&data[header_end..end]).to_string(),
        }
    }

    fn sample_payload() -> PredictionRequest {
        let mut form = FormState::default();
        form.load_sample_data();
        PredictionRequest::from_form(&form)
    }

    #[test]
    fn test_predict_posts_json_and_parses_result() {
        let stub = serve_once(
            200,
            "application/json",
            br#"{"disease_type":"Diabetes","prediction":"Readmitted","readmission_probability":0.1234,"risk_label":"Low"}"#,
        );
        let api = HttpApi::new(&stub.base_url, None).expect("client");
        let payload = sample_payload();

        let response = api.predict(&payload).expect("predict");
        assert_eq!(response.readmission_probability, Some(0.1234));
        assert_eq!(response.risk_label.as_deref(), Some("Low"));

        let captured = stub.captured();
        assert_eq!(captured.request_line, "POST /api/predict HTTP/1.1");
        assert!(captured.head.contains("content-type: application/json"));
        let sent: PredictionRequest = serde_json::from_str(&captured.body).expect("json body");
        assert_eq!(sent, payload);
    }

    #[test]
    fn test_simulation_hits_its_endpoint() {
        let stub = serve_once(
            200,
            "application/json",
            br#"{"simulation_date":"2026-03-16","hospital_unit":"ICU","staffing":{"expected_readmissions":5,"suggested_beds":10,"suggested_nurses":20,"suggested_doctors":3}}"#,
        );
        let api = HttpApi::new(&format!("{}/", stub.base_url), None).expect("client");
        let mut payload = sample_payload();
        payload.merge_simulation("2026-03-16", "ICU");

        let response = api.simulate_staffing(&payload).expect("simulate");
        assert_eq!(response.staffing.suggested_beds, 10.0);

        let captured = stub.captured();
        assert_eq!(captured.request_line, "POST /api/simulate_staffing HTTP/1.1");
        assert!(captured.body.contains("\"Hospital Unit\":\"ICU\""));
    }

    #[test]
    fn test_report_returns_raw_bytes() {
        let pdf = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n1 0 obj";
        let stub = serve_once(200, "application/pdf", pdf);
        let api = HttpApi::new(&stub.base_url, None).expect("client");

        let bytes = api.report(&sample_payload()).expect("report");
        assert_eq!(bytes, pdf.to_vec());
        assert_eq!(stub.captured().request_line, "POST /api/report HTTP/1.1");
    }

    #[test]
    fn test_server_error_message_is_extracted() {
        let stub = serve_once(400, "application/json", br#"{"error":"Missing Age"}"#);
        let api = HttpApi::new(&stub.base_url, None).expect("client");

        let err = api.predict(&sample_payload()).expect_err("should fail");
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: Some("Missing Age".to_string())
            }
        );
        let _ = stub.captured();
    }

    #[test]
    fn test_server_error_without_body() {
        let stub = serve_once(500, "text/plain", b"");
        let api = HttpApi::new(&stub.base_url, None).expect("client");

        let err = api.report(&sample_payload()).expect_err("should fail");
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                message: None
            }
        );
        let _ = stub.captured();
    }

    #[test]
    fn test_malformed_success_body() {
        let stub = serve_once(200, "text/html", b"<html>proxy login</html>");
        let api = HttpApi::new(&stub.base_url, None).expect("client");

        let err = api.predict(&sample_payload()).expect_err("should fail");
        assert!(matches!(err, ApiError::Decode(_)));
        let _ = stub.captured();
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let api = HttpApi::new(&format!("http://127.0.0.1:{port}"), Some(Duration::from_secs(5)))
            .expect("client");

        let err = api.predict(&sample_payload()).expect_err("should fail");
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
