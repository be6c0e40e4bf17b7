//! Integration tests for the ec2ctl CLI. None of these reach AWS.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::NamedTempFile;

/// ec2ctl with ambient AWS configuration stripped.
fn ec2ctl() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("ec2ctl"));
    cmd.env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .env_remove("AWS_SESSION_TOKEN")
        .env_remove("RUST_LOG")
        .env("AWS_SHARED_CREDENTIALS_FILE", "/nonexistent/ec2ctl/credentials");
    cmd
}

fn credentials_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[default]\naws_access_key_id = AKIDTEST\naws_secret_access_key = secrettest"
    )
    .unwrap();
    file
}

#[test]
fn test_help() {
    ec2ctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage AWS EC2 instances"));
}

#[test]
fn test_start_without_instance_id() {
    ec2ctl()
        .args(["start", "us-east-1"])
        .assert()
        .code(2)
        .stdout("An instance id is required for 'start' action\n");
}

#[test]
fn test_launch_missing_flags() {
    ec2ctl()
        .args(["launch", "us-east-1", "--ami", "ami-1", "--subnet", "subnet-1"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "you need to specify --ami, --instance_type, --subnet, and --security_group",
        ));
}

#[test]
fn test_zero_backoff_factor_rejected() {
    ec2ctl()
        .args([
            "start",
            "us-east-1",
            "--instance_id",
            "i-1",
            "--backoff_factor",
            "0",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("--backoff_factor must be at least 1"));
}

#[test]
fn test_launch_dry_run_prints_specification() {
    let output = ec2ctl()
        .args([
            "launch",
            "eu-west-1",
            "--ami",
            "ami-0abc",
            "--instance_type",
            "g5.xlarge",
            "--subnet",
            "subnet-0abc",
            "--security_group",
            "sg-0abc",
            "--dry_run",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let spec: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(spec["MinCount"], 1);
    assert_eq!(spec["MaxCount"], 1);
    assert_eq!(spec["ImageId"], "ami-0abc");
    assert_eq!(spec["InstanceType"], "g5.xlarge");
    assert_eq!(spec["EbsOptimized"], true);
    assert_eq!(spec["BlockDeviceMappings"][0]["Ebs"]["VolumeSize"], 100);
    assert_eq!(spec["NetworkInterfaces"][0]["SubnetId"], "subnet-0abc");
}

#[test]
fn test_unknown_profile_fails() {
    let creds = credentials_file();
    ec2ctl()
        .env("AWS_SHARED_CREDENTIALS_FILE", creds.path())
        .args(["start", "us-east-1", "--instance_id", "i-1", "--profile", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Profile 'nope' not found"));
}

#[test]
fn test_launch_transport_error_is_fatal() {
    let creds = credentials_file();
    ec2ctl()
        .env("AWS_SHARED_CREDENTIALS_FILE", creds.path())
        .args([
            "launch",
            "us-east-1",
            "--ami",
            "ami-1",
            "--instance_type",
            "t3.micro",
            "--subnet",
            "subnet-1",
            "--security_group",
            "sg-1",
            "--endpoint_url",
            "http://127.0.0.1:1/",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("transport error"))
        .stderr(predicate::str::contains("Attempt 1 of 6"))
        .stderr(predicate::str::contains("Attempt 2 of 6").not());
}

/// Serves one scripted `(status, body)` reply per connection on a local
/// port, then returns every request it saw (head and body, as text).
fn fake_endpoint(replies: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, body) in replies {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some((name, value)) = line.split_once(':')
                    && name.eq_ignore_ascii_case("content-length")
                {
                    content_length = value.trim().parse().unwrap();
                }
                request.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut payload = vec![0u8; content_length];
            reader.read_exact(&mut payload).unwrap();
            request.push_str(&String::from_utf8(payload).unwrap());
            seen.push(request);

            let response = format!(
                "HTTP/1.1 {} Scripted\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
        seen
    });
    (url, handle)
}

const CAPACITY_ERROR: &str = "<Response><Errors><Error><Code>InsufficientInstanceCapacity</Code><Message>We currently do not have sufficient t3.micro capacity.</Message></Error></Errors><RequestID>req-1</RequestID></Response>";

const RUN_INSTANCES_OK: &str = r#"<RunInstancesResponse xmlns="http://ec2.amazonaws.com/doc/2016-11-15/"><requestId>req-2</requestId><instancesSet><item><instanceId>i-0new</instanceId></item></instancesSet></RunInstancesResponse>"#;

#[test]
fn test_launch_retries_capacity_then_prints_instance_id() {
    let creds = credentials_file();
    let (url, server) = fake_endpoint(vec![(500, CAPACITY_ERROR), (200, RUN_INSTANCES_OK)]);

    ec2ctl()
        .env("AWS_SHARED_CREDENTIALS_FILE", creds.path())
        .args([
            "launch",
            "us-east-1",
            "--ami",
            "ami-1",
            "--instance_type",
            "t3.micro",
            "--subnet",
            "subnet-1",
            "--security_group",
            "sg-1",
            "--backoff_factor",
            "1",
            "--endpoint_url",
            url.as_str(),
        ])
        .assert()
        .success()
        .stdout("i-0new\n")
        .stderr(predicate::str::contains(
            "Attempt 1 of 6: Insufficient capacity for t3.micro, waiting 1 seconds",
        ))
        .stderr(predicate::str::contains("Launched instance i-0new"));

    let requests = server.join().unwrap();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        let lower = request.to_ascii_lowercase();
        assert!(lower.starts_with("post / http/1.1"));
        assert!(lower.contains(
            "authorization: aws4-hmac-sha256 credential=akidtest/"
        ));
        assert!(lower.contains("/us-east-1/ec2/aws4_request"));
        assert!(lower.contains("x-amz-date: "));
        assert!(request.contains("Action=RunInstances&Version=2016-11-15"));
        assert!(request.contains("MinCount=1&MaxCount=1"));
        assert!(request.contains("NetworkInterface.1.SecurityGroupId.1=sg-1"));
    }
}

#[test]
fn test_start_retries_bare_server_error() {
    let creds = credentials_file();
    let (url, server) = fake_endpoint(vec![
        (503, "Service Unavailable"),
        (200, "<StartInstancesResponse/>"),
    ]);

    // Flags may come before the action, as with the positional form.
    ec2ctl()
        .env("AWS_SHARED_CREDENTIALS_FILE", creds.path())
        .args([
            "--instance_id",
            "i-1",
            "--backoff_factor",
            "1",
            "--endpoint_url",
            url.as_str(),
            "start",
            "us-east-1",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Instance i-1 not yet ready, waiting 1 seconds"))
        .stderr(predicate::str::contains("Started instance i-1"));

    let requests = server.join().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].contains("Action=StartInstances&Version=2016-11-15&InstanceId.1=i-1"));
}

#[test]
fn test_flags_are_accepted_in_any_position() {
    ec2ctl()
        .args(["--instance_id", "i-7", "--dry_run", "start", "us-east-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"i-7\""));

    // Flags meant for the other action are ignored.
    ec2ctl()
        .args([
            "launch",
            "us-east-1",
            "--instance_id",
            "i-1",
            "--ami",
            "ami-1",
            "--instance_type",
            "t3.micro",
            "--subnet",
            "subnet-1",
            "--security_group",
            "sg-1",
            "--dry_run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ImageId\": \"ami-1\""));
}

#[test]
fn test_unknown_action_is_rejected() {
    ec2ctl()
        .args(["stop", "us-east-1", "--instance_id", "i-1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'stop'"));
}
