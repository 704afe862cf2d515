// Aliyun OSS Rust Library for Object Storage Service
// Copyright 2022 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use aliyun_oss::oss::options::{
    access_control_request_headers, access_control_request_method, body, content_type, meta,
    origin, range,
};
use aliyun_oss::oss::types::{Acl, AppendPosition};
use oss_common::mock_server::MockResponse;
use oss_common::test_context::{BUCKET, OBJECT, TestContext};

#[tokio::test]
async fn put_object() {
    let ctx = TestContext::new(MockResponse::ok()).await;

    ctx.client
        .put_object(BUCKET, OBJECT, "wefpofjwefew", Vec::new())
        .await
        .unwrap();

    let req = ctx.request().await;
    TestContext::assert_signed(
        &req,
        "PUT",
        "/bucket-name/object/name",
        "gbvg8Xcdy0qvDT2e7uUdtj6/VZE=",
    );
    assert_eq!(req.header("Content-Type"), Some("application/octet-stream"));
    assert_eq!(req.header("Content-Length"), Some("12"));
    assert_eq!(req.body_str(), "wefpofjwefew");
}

#[tokio::test]
async fn put_object_user_content_type_wins() {
    let ctx = TestContext::new(MockResponse::ok()).await;

    ctx.client
        .put_object(
            BUCKET,
            OBJECT,
            "hello",
            vec![content_type("text/plain"), meta("Author", "me")],
        )
        .await
        .unwrap();

    let req = ctx.request().await;
    assert_eq!(req.header("Content-Type"), Some("text/plain"));
    assert_eq!(req.header("x-oss-meta-author"), Some("me"));
}

#[tokio::test]
async fn put_object_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    std::fs::write(&path, b"<html></html>").unwrap();
    let ctx = TestContext::new(MockResponse::ok()).await;

    ctx.client
        .put_object_from_file(BUCKET, OBJECT, &path, Vec::new())
        .await
        .unwrap();

    let req = ctx.request().await;
    assert_eq!(req.header("Content-Type"), Some("text/html"));
    assert_eq!(req.header("Content-Length"), Some("13"));
    assert_eq!(req.body_str(), "<html></html>");
}

#[tokio::test]
async fn get_object() {
    let ctx = TestContext::new(
        MockResponse::ok()
            .header("Content-Type", "text/plain")
            .header("ETag", "\"5B3C1A2E053D763E1B002CC607C5A0FE\"")
            .body("abcdef"),
    )
    .await;

    let mut out: Vec<u8> = Vec::new();
    ctx.client
        .get_object(BUCKET, OBJECT, &mut out, Vec::new())
        .await
        .unwrap();

    let req = ctx.request().await;
    TestContext::assert_signed(
        &req,
        "GET",
        "/bucket-name/object/name",
        "pZol4Z6em1QCAz53w4OatKsdi3w=",
    );
    assert_eq!(out, b"abcdef");
}

#[tokio::test]
async fn get_object_range() {
    let ctx = TestContext::new(MockResponse::new(206).body("bcd")).await;

    let mut out: Vec<u8> = Vec::new();
    ctx.client
        .get_object(BUCKET, OBJECT, &mut out, vec![range(1, Some(3))])
        .await
        .unwrap();

    let req = ctx.request().await;
    assert_eq!(req.header("Range"), Some("bytes=1-3"));
    assert_eq!(out, b"bcd");
}

#[tokio::test]
async fn get_object_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("object.txt");
    let ctx = TestContext::new(MockResponse::ok().body("abcdef")).await;

    ctx.client
        .get_object_to_file(BUCKET, OBJECT, &path, Vec::new())
        .await
        .unwrap();

    ctx.request().await;
    assert_eq!(std::fs::read(&path).unwrap(), b"abcdef");
}

#[tokio::test]
async fn append_object() {
    let ctx = TestContext::new(
        MockResponse::ok()
            .header("ETag", "\"0F7230CAA4BE94CCBDC99C5500000000\"")
            .header("x-oss-hash-crc64ecma", "14741617095266562575")
            .header("x-oss-next-append-position", "16"),
    )
    .await;

    let next = ctx
        .client
        .append_object(BUCKET, OBJECT, "sfweruewpinbeewa", 0, Vec::new())
        .await
        .unwrap();

    let req = ctx.request().await;
    TestContext::assert_signed(
        &req,
        "POST",
        "/bucket-name/object/name?append&position=0",
        "PwNSrS1NZvpPH6pfzPiIvQWH0G8=",
    );
    assert_eq!(req.header("Content-Length"), Some("16"));
    assert_eq!(next, AppendPosition(16));
}

#[tokio::test]
async fn append_object_without_position_header() {
    let ctx = TestContext::new(MockResponse::ok()).await;

    let err = ctx
        .client
        .append_object(BUCKET, OBJECT, "abc", 16, Vec::new())
        .await
        .unwrap_err();

    let req = ctx.request().await;
    assert_eq!(req.target, "/bucket-name/object/name?append&position=16");
    assert!(err.to_string().contains("x-oss-next-append-position"));
}

#[tokio::test]
async fn copy_object() {
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<CopyObjectResult xmlns="http://doc.oss-cn-hangzhou.aliyuncs.com">
    <LastModified>Fri, 24 Feb 2012 07:18:48 GMT</LastModified>
    <ETag>"5B3C1A2E053D763E1B002CC607C5A0FE"</ETag>
</CopyObjectResult>"#;
    let ctx = TestContext::new(MockResponse::ok().body(body)).await;

    let result = ctx
        .client
        .copy_object(
            "source-bucket",
            "source-object",
            "target-bucket",
            "target-object",
            Vec::new(),
        )
        .await
        .unwrap();

    let req = ctx.request().await;
    TestContext::assert_signed(
        &req,
        "PUT",
        "/target-bucket/target-object",
        "83kiZ9FOf79+NONgJAXk00Hzk4g=",
    );
    assert_eq!(
        req.header("x-oss-copy-source"),
        Some("/source-bucket/source-object")
    );
    assert_eq!(req.header("Content-Type"), None);
    assert_eq!(req.header("Content-Length"), Some("0"));
    assert_eq!(result.last_modified, "Fri, 24 Feb 2012 07:18:48 GMT");
    assert_eq!(result.etag, "\"5B3C1A2E053D763E1B002CC607C5A0FE\"");
}

#[tokio::test]
async fn delete_object() {
    let ctx = TestContext::new(MockResponse::new(204)).await;

    ctx.client
        .delete_object(BUCKET, OBJECT, Vec::new())
        .await
        .unwrap();

    let req = ctx.request().await;
    TestContext::assert_signed(
        &req,
        "DELETE",
        "/bucket-name/object/name",
        "V1ehjYUAX1v6/ZUCzNKbCLKXQWE=",
    );
}

#[tokio::test]
async fn delete_objects() {
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<DeleteResult xmlns="http://doc.oss-cn-hangzhou.aliyuncs.com">
    <Deleted>
       <Key>obj1</Key>
    </Deleted>
    <Deleted>
       <Key>obj2</Key>
    </Deleted>
    <Deleted>
       <Key>obj3</Key>
    </Deleted>
</DeleteResult>"#;
    let ctx = TestContext::new(MockResponse::ok().body(body)).await;

    let result = ctx
        .client
        .delete_objects(BUCKET, ["obj1", "obj2", "obj3"], false, Vec::new())
        .await
        .unwrap();

    let req = ctx.request().await;
    TestContext::assert_signed(&req, "POST", "/bucket-name/?delete", "TmXuZ8SpwHR8lvCewR/jnnoR1qA=");
    assert_eq!(req.header("Content-MD5"), Some("JDhCJwY/U4gHz5o/Q4eCoQ=="));
    assert_eq!(req.header("Content-Length"), Some("133"));
    assert_eq!(
        req.body_str(),
        "<Delete><Quiet>false</Quiet><Object><Key>obj1</Key></Object><Object><Key>obj2</Key>\
         </Object><Object><Key>obj3</Key></Object></Delete>"
    );
    let keys: Vec<&str> = result.deleted.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, vec!["obj1", "obj2", "obj3"]);
}

#[tokio::test]
async fn delete_objects_digests_the_sent_body() {
    let ctx = TestContext::new(MockResponse::ok().body("<DeleteResult/>")).await;

    ctx.client
        .delete_objects(BUCKET, ["obj1"], false, vec![body("replacement body")])
        .await
        .unwrap();

    let req = ctx.request().await;
    assert_eq!(req.body_str(), "replacement body");
    assert_eq!(req.header("Content-MD5"), Some("nD7V5kLTKwOY5nM72eUapQ=="));
}

#[tokio::test]
async fn copy_object_sends_zero_content_length() {
    let ctx = TestContext::new(MockResponse::ok().body(
        "<CopyObjectResult><LastModified>Fri, 24 Feb 2012 07:18:48 GMT</LastModified>\
         <ETag>\"5B3C1A2E053D763E1B002CC607C5A0FE\"</ETag></CopyObjectResult>",
    ))
    .await;

    ctx.client
        .copy_object("source-bucket", "source-object", BUCKET, OBJECT, Vec::new())
        .await
        .unwrap();

    let req = ctx.request().await;
    assert_eq!(req.header("Content-Length"), Some("0"));
    assert!(req.body.is_empty());
}

#[tokio::test]
async fn head_object() {
    let ctx = TestContext::new(
        MockResponse::ok()
            .header("x-oss-request-id", "06d4be30-2216-9264-757a-8f8b19b254bb")
            .header("ETag", "\"fba9dede5f27731c9771645a39863328\""),
    )
    .await;

    let headers = ctx
        .client
        .head_object(BUCKET, OBJECT, Vec::new())
        .await
        .unwrap();

    let req = ctx.request().await;
    TestContext::assert_signed(
        &req,
        "HEAD",
        "/bucket-name/object/name",
        "B29hiJ0Fu10nq+kyeb4+vM6Cwns=",
    );
    assert_eq!(
        headers.get("x-oss-request-id").unwrap(),
        "06d4be30-2216-9264-757a-8f8b19b254bb"
    );
    assert_eq!(
        headers.get("etag").unwrap(),
        "\"fba9dede5f27731c9771645a39863328\""
    );
}

#[tokio::test]
async fn put_object_acl() {
    let ctx = TestContext::new(MockResponse::ok()).await;

    ctx.client
        .put_object_acl(BUCKET, OBJECT, Acl::PublicRead, Vec::new())
        .await
        .unwrap();

    let req = ctx.request().await;
    TestContext::assert_signed(
        &req,
        "PUT",
        "/bucket-name/object/name?acl",
        "Z31vuwnUDv9rezqnsdANa3+Utfs=",
    );
    assert_eq!(req.header("x-oss-acl"), Some("public-read"));
}

#[tokio::test]
async fn get_object_acl() {
    let body = r#"<?xml version="1.0" ?>
<AccessControlPolicy>
    <Owner>
        <ID>00220120222</ID>
        <DisplayName>user_example</DisplayName>
    </Owner>
    <AccessControlList>
        <Grant>public-read</Grant>
    </AccessControlList>
</AccessControlPolicy>"#;
    let ctx = TestContext::new(MockResponse::ok().body(body)).await;

    let policy = ctx
        .client
        .get_object_acl(BUCKET, OBJECT, Vec::new())
        .await
        .unwrap();

    let req = ctx.request().await;
    TestContext::assert_signed(
        &req,
        "GET",
        "/bucket-name/object/name?acl",
        "EbdVS7t4lipCbC4PPjUbwgOIToo=",
    );
    assert_eq!(policy.access_control_list.grant, "public-read");
}

#[tokio::test]
async fn option_object() {
    let ctx = TestContext::new(
        MockResponse::ok()
            .header("Access-Control-Allow-Origin", "http://www.example.com")
            .header("Access-Control-Allow-Methods", "PUT")
            .header("Access-Control-Expose-Headers", "x-oss-test"),
    )
    .await;

    let headers = ctx
        .client
        .option_object(
            BUCKET,
            OBJECT,
            vec![
                origin("http://www.example.com"),
                access_control_request_method("PUT"),
                access_control_request_headers("x-oss-test"),
            ],
        )
        .await
        .unwrap();

    let req = ctx.request().await;
    TestContext::assert_signed(
        &req,
        "OPTIONS",
        "/bucket-name/object/name",
        "y5a3p8IEGw6n2bY9jUG4mu2ywVI=",
    );
    assert_eq!(req.header("Origin"), Some("http://www.example.com"));
    assert_eq!(req.header("Access-Control-Request-Method"), Some("PUT"));
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://www.example.com"
    );
}
