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

use aliyun_oss::oss::clock::FixedClock;
use aliyun_oss::oss::creds::StaticProvider;
use aliyun_oss::oss::multimap_ext::{Multimap, MultimapExt};
use aliyun_oss::oss::options::{body, content_md5, content_type, meta, param};
use aliyun_oss::oss::signer::sign_v1;
use aliyun_oss::oss::OssClientBuilder;
use chrono::{TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use http::{HeaderMap, HeaderValue, Method};
use std::hint::black_box;
use std::time::Duration;

fn bench_sign_v1(c: &mut Criterion) {
    let mut query = Multimap::new();
    query.add("partNumber", "1");
    query.add("uploadId", "0004B9895DBBB6EC98E36");

    c.bench_function("sign_v1", |b| {
        b.iter(|| {
            let mut headers = HeaderMap::new();
            headers.insert("date", HeaderValue::from_static("Wed, 21 Oct 2015 15:56:35 GMT"));
            headers.insert(
                "content-type",
                HeaderValue::from_static("application/octet-stream"),
            );
            headers.insert("x-oss-meta-author", HeaderValue::from_static("me"));
            headers.insert("x-oss-acl", HeaderValue::from_static("private"));
            sign_v1(
                &Method::PUT,
                &mut headers,
                "bucket-name",
                "object/name",
                &query,
                "ayahghai0juiSie",
                "quitie*ph3Lah{F",
            )
            .unwrap();
            black_box(headers)
        })
    });
}

fn bench_new_request(c: &mut Criterion) {
    let client = OssClientBuilder::new("oss-cn-hangzhou.aliyuncs.com".parse().unwrap())
        .provider(Some(StaticProvider::new(
            "ayahghai0juiSie",
            "quitie*ph3Lah{F",
            None,
        )))
        .clock(FixedClock(
            Utc.with_ymd_and_hms(2015, 10, 21, 15, 56, 35).unwrap(),
        ))
        .build()
        .unwrap();
    let data = vec![7u8; 64 * 1024];

    c.bench_function("new_request put 64KiB with md5", |b| {
        b.iter(|| {
            let req = client
                .new_request(
                    Method::PUT,
                    "bucket-name",
                    "object/name",
                    vec![
                        content_type("application/octet-stream"),
                        meta("author", "me"),
                        body(data.clone()),
                        content_md5(),
                    ],
                )
                .unwrap();
            black_box(req)
        })
    });

    c.bench_function("new_request get acl", |b| {
        b.iter(|| {
            let req = client
                .new_request(
                    Method::GET,
                    "bucket-name",
                    "object/name",
                    vec![param("acl", "")],
                )
                .unwrap();
            black_box(req)
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .configure_from_args()
        .warm_up_time(Duration::from_secs_f32(0.5))
        .measurement_time(Duration::from_secs_f32(3.0));
    targets = bench_sign_v1, bench_new_request
);
criterion_main!(benches);
